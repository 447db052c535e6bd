//! Error types for Explain This.

use thiserror::Error;

/// Library-level error type for Explain This operations.
#[derive(Error, Debug)]
pub enum ExplainError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Error processing PDF: {0}")]
    Pdf(String),

    #[error("Error fetching transcript: {0}")]
    Transcript(String),

    #[error("Error generating explanation: {0}")]
    OpenAI(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ExplainError {
    /// Shorthand for a client-side validation failure.
    pub fn invalid(msg: impl Into<String>) -> Self {
        ExplainError::InvalidInput(msg.into())
    }

    /// Whether the error was caused by the caller's input rather than by
    /// extraction libraries or the completion API.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ExplainError::InvalidInput(_))
    }
}

/// Result type alias for Explain This operations.
pub type Result<T> = std::result::Result<T, ExplainError>;
