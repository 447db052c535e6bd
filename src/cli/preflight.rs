//! Pre-flight checks before calling external services.
//!
//! Fails fast with a helpful message instead of letting the completion call
//! fail after extraction has already run.

use crate::error::{ExplainError, Result};

/// Check everything generating an explanation needs.
pub fn check_explain() -> Result<()> {
    check_api_key(std::env::var("OPENAI_API_KEY").ok())
}

/// Check that an OpenAI API key is configured.
fn check_api_key(key: Option<String>) -> Result<()> {
    match key {
        Some(key) if !key.trim().is_empty() => Ok(()),
        Some(_) => Err(ExplainError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        None => Err(ExplainError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_validation() {
        assert!(check_api_key(Some("sk-test".to_string())).is_ok());
        assert!(check_api_key(Some("   ".to_string())).is_err());

        let err = check_api_key(None).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY not set"));
    }
}
