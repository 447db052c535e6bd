//! API request and response types.

use crate::config::ComplexityLevel;
use crate::orchestrator::Explanation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
    #[serde(default)]
    pub complexity_level: ComplexityLevel,
}

#[derive(Debug, Deserialize)]
pub struct YouTubeRequest {
    pub youtube_url: String,
    #[serde(default)]
    pub complexity_level: ComplexityLevel,
}

/// Query parameters accepted by `/upload-pdf`.
#[derive(Debug, Default, Deserialize)]
pub struct PdfQuery {
    pub complexity_level: Option<ComplexityLevel>,
}

/// Result of explaining a PDF or raw text.
#[derive(Debug, Serialize, Deserialize)]
pub struct TextExplanationResponse {
    pub original_text: String,
    pub explanation: String,
    pub complexity_level: ComplexityLevel,
}

impl From<Explanation> for TextExplanationResponse {
    fn from(e: Explanation) -> Self {
        Self {
            original_text: e.source_text,
            explanation: e.explanation,
            complexity_level: e.complexity_level,
        }
    }
}

/// Result of explaining a video transcript.
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptExplanationResponse {
    pub original_transcript: String,
    pub explanation: String,
    pub complexity_level: ComplexityLevel,
}

impl From<Explanation> for TranscriptExplanationResponse {
    fn from(e: Explanation) -> Self {
        Self {
            original_transcript: e.source_text,
            explanation: e.explanation,
            complexity_level: e.complexity_level,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
