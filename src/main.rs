//! Explain This CLI entry point.

use anyhow::Result;
use clap::Parser;
use explain_this::cli::{commands, Cli, Commands};
use explain_this::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration: .env first, real environment wins
    Settings::load_env_file(None);
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Initialize logging: RUST_LOG, then -v, then LOG_LEVEL / config
    let log_level = match cli.verbose {
        0 => settings.general.log_level.clone(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| {
            format!("explain_this={},tower_http={}", log_level, log_level)
        })))
        .with(tracing_subscriber::fmt::layer().with_target(settings.server.debug))
        .init();

    // Execute command
    match &cli.command {
        Commands::Serve { host, port } => {
            commands::run_serve(host.clone(), *port, settings).await?;
        }

        Commands::Text { text, level } => {
            commands::run_text(text, *level, settings).await?;
        }

        Commands::Pdf { path, level } => {
            commands::run_pdf(path, *level, settings).await?;
        }

        Commands::Youtube { url, level } => {
            commands::run_youtube(url, *level, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, cli.config.as_deref(), settings)?;
        }
    }

    Ok(())
}
