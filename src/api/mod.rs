//! REST API for Explain This.
//!
//! # Endpoints
//!
//! - `GET /` - Informational message
//! - `GET /health` - Health check
//! - `POST /upload-pdf` - Explain an uploaded PDF (multipart form data)
//! - `POST /youtube-link` - Explain a YouTube video's transcript
//! - `POST /explain-text` - Explain submitted text
//!
//! # cURL Examples
//!
//! ```bash
//! curl -F "file=@paper.pdf" "http://localhost:8000/upload-pdf?complexity_level=expert"
//!
//! curl -H 'content-type: application/json' \
//!      -d '{"youtube_url": "https://youtu.be/dQw4w9WgXcQ", "complexity_level": "child"}' \
//!      http://localhost:8000/youtube-link
//! ```

mod error;
mod handlers;
mod types;

pub use error::ApiError;
pub use types::{
    ErrorResponse, HealthResponse, PdfQuery, RootResponse, TextExplanationResponse, TextRequest,
    TranscriptExplanationResponse, YouTubeRequest,
};

use crate::config::ServerSettings;
use crate::orchestrator::Orchestrator;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use handlers::{
    explain_text_handler, health_handler, root_handler, upload_pdf_handler, youtube_link_handler,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Origin of the bundled frontend's dev server, always allowed.
const DEV_FRONTEND_ORIGIN: &str = "http://localhost:3000";

/// Room for multipart framing and form fields on top of the file itself, so
/// a modestly oversized file reaches the handler and gets a descriptive 400.
/// Bodies past this allowance are cut off with 413.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Shared application state.
pub struct AppState {
    pub orchestrator: Orchestrator,
}

/// Create the API router with all routes configured.
pub fn create_router(orchestrator: Orchestrator) -> Router {
    let cors = cors_layer(&orchestrator.settings().server);
    let file_limit = usize::try_from(orchestrator.settings().limits.max_file_size_bytes())
        .unwrap_or(usize::MAX);
    let body_limit = file_limit.saturating_add(MULTIPART_OVERHEAD_BYTES);

    let state = Arc::new(AppState { orchestrator });

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/upload-pdf", post(upload_pdf_handler))
        .route("/youtube-link", post(youtube_link_handler))
        .route("/explain-text", post(explain_text_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(server: &ServerSettings) -> CorsLayer {
    let origins: Vec<HeaderValue> = [server.frontend_url.as_str(), DEV_FRONTEND_ORIGIN]
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    tracing::info!("CORS configured with {} allowed origin(s)", origins.len());

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
