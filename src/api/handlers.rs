//! API request handlers.

use super::{
    error::ApiError,
    types::{
        HealthResponse, PdfQuery, RootResponse, TextExplanationResponse, TextRequest,
        TranscriptExplanationResponse, YouTubeRequest,
    },
    AppState,
};
use crate::config::ComplexityLevel;
use axum::{
    extract::{rejection::JsonRejection, Multipart, Query, State},
    Json,
};
use std::sync::Arc;

const ROOT_MESSAGE: &str =
    "Explain This API - Upload PDFs, paste YouTube links, or submit text for explanations!";

/// GET /
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE,
    })
}

/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /upload-pdf
///
/// Multipart form with a `file` field. The complexity level may be given as
/// a `complexity_level` query parameter or form field; the form field wins.
pub async fn upload_pdf_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PdfQuery>,
    mut multipart: Multipart,
) -> Result<Json<TextExplanationResponse>, ApiError> {
    let mut level = query.complexity_level.unwrap_or_default();
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await?;
                upload = Some((filename, data.to_vec()));
            }
            "complexity_level" => {
                let value = field.text().await?;
                level = ComplexityLevel::from_name(value.trim());
            }
            _ => {}
        }
    }

    let (filename, bytes) = upload.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;

    let result = state
        .orchestrator
        .explain_pdf(&filename, bytes, level)
        .await?;

    Ok(Json(result.into()))
}

/// POST /youtube-link
pub async fn youtube_link_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<YouTubeRequest>, JsonRejection>,
) -> Result<Json<TranscriptExplanationResponse>, ApiError> {
    let Json(req) = payload?;
    let result = state
        .orchestrator
        .explain_youtube(&req.youtube_url, req.complexity_level)
        .await?;

    Ok(Json(result.into()))
}

/// POST /explain-text
pub async fn explain_text_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<TextExplanationResponse>, ApiError> {
    let Json(req) = payload?;
    let result = state
        .orchestrator
        .explain_text(&req.text, req.complexity_level)
        .await?;

    Ok(Json(result.into()))
}
