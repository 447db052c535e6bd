//! HTTP mapping for pipeline errors.

use super::types::ErrorResponse;
use crate::error::ExplainError;
use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

/// An error ready to be sent as `{"detail": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }
}

impl From<ExplainError> for ApiError {
    fn from(err: ExplainError) -> Self {
        match err {
            ExplainError::InvalidInput(detail) => {
                warn!("Rejected request: {}", detail);
                Self::bad_request(detail)
            }
            other => {
                error!("{}", other);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    detail: other.to_string(),
                }
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        warn!("Rejected multipart body: {}", err.body_text());
        Self {
            status: err.status(),
            detail: err.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { detail: self.detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_maps_to_400_with_bare_detail() {
        let api: ApiError = ExplainError::invalid("File must be a PDF").into();
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.detail, "File must be a PDF");
    }

    #[test]
    fn test_server_error_maps_to_500_with_underlying_message() {
        let api: ApiError = ExplainError::OpenAI("timed out".to_string()).into();
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.detail, "Error generating explanation: timed out");

        let api: ApiError = ExplainError::Pdf("invalid xref".to_string()).into();
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.detail, "Error processing PDF: invalid xref");
    }
}
