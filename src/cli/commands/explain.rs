//! One-shot explanation commands (text, pdf, youtube).

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::{ComplexityLevel, Settings};
use crate::error::Result as ExplainResult;
use crate::orchestrator::{Explanation, Orchestrator};
use anyhow::{Context, Result};
use std::future::Future;
use std::path::Path;

/// Run the text command.
pub async fn run_text(text: &str, level: ComplexityLevel, settings: Settings) -> Result<()> {
    let orchestrator = prepare(settings)?;
    let result = with_spinner(
        "Generating explanation...",
        orchestrator.explain_text(text, level),
    )
    .await?;

    print_explanation("Text:", &result);
    Ok(())
}

/// Run the pdf command.
pub async fn run_pdf(path: &str, level: ComplexityLevel, settings: Settings) -> Result<()> {
    let orchestrator = prepare(settings)?;

    let filename = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path))?;

    let result = with_spinner(
        "Extracting PDF text and generating explanation...",
        orchestrator.explain_pdf(&filename, bytes, level),
    )
    .await?;

    print_explanation("PDF text:", &result);
    Ok(())
}

/// Run the youtube command.
pub async fn run_youtube(url: &str, level: ComplexityLevel, settings: Settings) -> Result<()> {
    let orchestrator = prepare(settings)?;
    let result = with_spinner(
        "Fetching transcript and generating explanation...",
        orchestrator.explain_youtube(url, level),
    )
    .await?;

    print_explanation("Transcript:", &result);
    Ok(())
}

fn prepare(settings: Settings) -> Result<Orchestrator> {
    if let Err(e) = preflight::check_explain() {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    Ok(Orchestrator::new(settings)?)
}

async fn with_spinner<F>(msg: &str, fut: F) -> Result<Explanation>
where
    F: Future<Output = ExplainResult<Explanation>>,
{
    let spinner = Output::spinner(msg);
    let result = fut.await;
    spinner.finish_and_clear();

    result.map_err(|e| {
        Output::error(&e.to_string());
        anyhow::Error::from(e)
    })
}

fn print_explanation(label: &str, result: &Explanation) {
    Output::header(&format!("Explanation ({})", result.complexity_level));
    println!("\n{}\n", result.explanation);
    Output::source_preview(label, &result.source_text);
}
