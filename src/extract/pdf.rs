//! PDF text extraction.
//!
//! Wraps the `pdf-extract` crate. Scanned or image-only PDFs produce no text
//! and are reported as a client error.

use crate::error::{ExplainError, Result};
use tracing::debug;

/// Check an upload before any parsing happens.
///
/// Rejects filenames without a `.pdf` extension and payloads larger than
/// `max_file_size_mb` megabytes.
pub fn validate_upload(filename: &str, size_bytes: u64, max_file_size_mb: u64) -> Result<()> {
    if !filename.ends_with(".pdf") {
        return Err(ExplainError::invalid("File must be a PDF"));
    }

    if size_bytes > max_file_size_mb.saturating_mul(1024 * 1024) {
        return Err(ExplainError::invalid(format!(
            "File size exceeds {}MB limit",
            max_file_size_mb
        )));
    }

    Ok(())
}

/// Extract the text of every page, concatenated in page order.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExplainError::Pdf(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(ExplainError::invalid("No text found in PDF"));
    }

    debug!("Extracted {} characters from PDF", text.chars().count());
    Ok(text)
}

/// Run [`extract_pdf_text`] on the blocking thread pool.
///
/// `pdf-extract` is synchronous and can panic on malformed documents; a
/// panic surfaces as [`ExplainError::Pdf`].
pub async fn extract_pdf_text_blocking(bytes: Vec<u8>) -> Result<String> {
    tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
        .await
        .map_err(|e| ExplainError::Pdf(format!("PDF parser aborted: {}", e)))?
}
