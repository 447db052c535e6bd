//! Pipeline orchestrator for Explain This.
//!
//! Runs validation, extraction, truncation and generation for each source
//! type. Shared by the HTTP handlers and the one-shot CLI commands.

use crate::config::{ComplexityLevel, Prompts, Settings};
use crate::error::{ExplainError, Result};
use crate::explain::{Explainer, OpenAIExplainer};
use crate::extract::{
    self, extract_video_id, join_fragments, truncate, TranscriptFetcher, YoutubeTranscriptFetcher,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    /// Source text as sent to the model (possibly truncated).
    pub source_text: String,
    pub explanation: String,
    pub complexity_level: ComplexityLevel,
}

/// The main orchestrator for the explanation pipeline.
pub struct Orchestrator {
    settings: Settings,
    explainer: Arc<dyn Explainer>,
    transcripts: Arc<dyn TranscriptFetcher>,
}

impl Orchestrator {
    /// Create an orchestrator backed by OpenAI and YouTube.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(settings.prompts_dir().as_deref())?;

        let explainer: Arc<dyn Explainer> =
            Arc::new(OpenAIExplainer::new(settings.openai.clone())?.with_prompts(prompts));
        let transcripts: Arc<dyn TranscriptFetcher> =
            Arc::new(YoutubeTranscriptFetcher::new(&settings.youtube.language)?);

        info!("Using {} for explanations", settings.openai.model);

        Ok(Self::with_components(settings, explainer, transcripts))
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        explainer: Arc<dyn Explainer>,
        transcripts: Arc<dyn TranscriptFetcher>,
    ) -> Self {
        Self {
            settings,
            explainer,
            transcripts,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Explain raw text.
    #[instrument(skip(self, text))]
    pub async fn explain_text(&self, text: &str, level: ComplexityLevel) -> Result<Explanation> {
        if text.trim().is_empty() {
            return Err(ExplainError::invalid("Text cannot be empty"));
        }

        info!("Processing text explanation for complexity level: {}", level);
        self.generate(text, level).await
    }

    /// Explain the text content of a PDF upload.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn explain_pdf(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        level: ComplexityLevel,
    ) -> Result<Explanation> {
        extract::validate_upload(
            filename,
            bytes.len() as u64,
            self.settings.limits.max_file_size_mb,
        )?;

        info!("Processing PDF: {}", filename);
        let text = extract::extract_pdf_text_blocking(bytes).await?;
        self.generate(&text, level).await
    }

    /// Explain the transcript of a YouTube video.
    #[instrument(skip(self))]
    pub async fn explain_youtube(&self, url: &str, level: ComplexityLevel) -> Result<Explanation> {
        let video_id =
            extract_video_id(url).ok_or_else(|| ExplainError::invalid("Invalid YouTube URL"))?;

        info!("Processing YouTube video: {}", video_id);
        let fragments = self.transcripts.fetch(&video_id).await?;

        let transcript = join_fragments(&fragments);
        if transcript.trim().is_empty() {
            return Err(ExplainError::invalid("No transcript found for this video"));
        }

        self.generate(&transcript, level).await
    }

    async fn generate(&self, text: &str, level: ComplexityLevel) -> Result<Explanation> {
        let source_text = truncate(text, self.settings.limits.max_text_length);
        debug!(
            "Sending {} characters to the model",
            source_text.chars().count()
        );

        let explanation = self.explainer.explain(&source_text, level).await?;

        Ok(Explanation {
            source_text,
            explanation,
            complexity_level: level,
        })
    }
}
