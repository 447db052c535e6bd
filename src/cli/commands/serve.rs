//! HTTP API server command.

use crate::api::create_router;
use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;

/// Run the HTTP API server.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    mut settings: Settings,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(port) = port {
        settings.server.port = port;
    }

    if let Err(e) = preflight::check_explain() {
        Output::warning(&format!("{} Explanation requests will fail.", e));
    }

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let model = settings.openai.model.clone();
    let frontend = settings.server.frontend_url.clone();
    let limits = settings.limits.clone();

    let orchestrator = Orchestrator::new(settings)?;
    let app = create_router(orchestrator);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Explain This API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    Output::kv("Model", &model);
    Output::kv("Allowed origin", &frontend);
    Output::kv("Max upload", &format!("{} MB", limits.max_file_size_mb));
    Output::kv("Max text length", &format!("{} chars", limits.max_text_length));
    println!();
    println!("Endpoints:");
    Output::kv("Info", "GET  /");
    Output::kv("Health", "GET  /health");
    Output::kv("PDF", "POST /upload-pdf");
    Output::kv("YouTube", "POST /youtube-link");
    Output::kv("Text", "POST /explain-text");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}
