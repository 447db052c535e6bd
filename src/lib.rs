//! Explain This - difficulty-leveled explanations
//!
//! Accepts a PDF, a YouTube URL, or raw text, extracts its text, and asks a
//! chat completion model to explain it for a child, a student, or an expert.
//!
//! # Architecture
//!
//! - `config` - Settings (TOML file plus environment) and prompt templates
//! - `extract` - PDF text extraction, YouTube transcripts, truncation
//! - `explain` - Explanation generation via OpenAI
//! - `orchestrator` - Validation → extraction → truncation → generation
//! - `api` - Axum HTTP endpoints
//! - `cli` - Command-line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use explain_this::config::{ComplexityLevel, Settings};
//! use explain_this::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let result = orchestrator
//!         .explain_text("Photosynthesis converts light into chemical energy.", ComplexityLevel::Child)
//!         .await?;
//!     println!("{}", result.explanation);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod explain;
pub mod extract;
pub mod openai;
pub mod orchestrator;

pub use error::{ExplainError, Result};
