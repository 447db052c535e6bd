//! Text extraction from explanation sources.
//!
//! Converts an uploaded PDF or a YouTube video into plain text, and applies
//! the shared truncation policy before anything is sent to the model.

mod pdf;
mod youtube;

pub use pdf::{extract_pdf_text, extract_pdf_text_blocking, validate_upload};
pub use youtube::{
    extract_video_id, join_fragments, TranscriptFetcher, TranscriptFragment,
    YoutubeTranscriptFetcher,
};

/// Marker appended to text cut by [`truncate`].
pub const TRUNCATION_MARKER: &str = "...";

/// Cut `text` to `max_chars` characters and append [`TRUNCATION_MARKER`].
///
/// Text at or under the limit is returned unchanged. Length is counted in
/// `char`s, so multi-byte characters are never split.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_under_limit_unchanged() {
        assert_eq!(truncate("short text", 100), "short text");
        assert_eq!(truncate("", 5), "");
    }

    #[test]
    fn test_truncate_at_limit_unchanged() {
        assert_eq!(truncate("abcde", 5), "abcde");
    }

    #[test]
    fn test_truncate_over_limit() {
        let result = truncate("abcdefgh", 5);
        assert_eq!(result, "abcde...");
        assert_eq!(result.chars().count(), 5 + TRUNCATION_MARKER.len());
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("héllo wörld", 7), "héllo w...");
        assert_eq!(truncate("日本語のテキスト", 3), "日本語...");
    }

    #[test]
    fn test_truncate_zero_limit() {
        assert_eq!(truncate("x", 0), "...");
        assert_eq!(truncate("", 0), "");
    }
}
