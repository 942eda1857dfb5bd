//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error taxonomy for the upload pipeline and its HTTP surface.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Ownership mismatch. Deliberately carries no detail.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Processing failed: {0}")]
    Processing(#[from] clipdock_media::MediaError),

    #[error("Storage unavailable: {0}")]
    Storage(#[from] clipdock_storage::StorageError),

    #[error("Persistence failed: {0}")]
    Persistence(String),
}

impl ApiError {
    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidIdentifier(_)
            | ApiError::BadRequest(_)
            | ApiError::UnsupportedMediaType(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Processing(_) | ApiError::Storage(_) | ApiError::Persistence(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<clipdock_db::DbError> for ApiError {
    fn from(err: clipdock_db::DbError) -> Self {
        match err {
            clipdock_db::DbError::NotFound(id) => Self::NotFound(format!("video {id}")),
            clipdock_db::DbError::Persistence(msg) => Self::Persistence(msg),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Ownership mismatch: no detail leaked, not even existence
        if matches!(self, ApiError::Unauthorized) {
            return (status, Json(json!({}))).into_response();
        }

        // Don't expose internal error details in production
        let detail = match &self {
            ApiError::Processing(_) | ApiError::Storage(_) | ApiError::Persistence(_) => {
                if std::env::var("ENVIRONMENT").unwrap_or_default() == "production" {
                    "An internal error occurred".to_string()
                } else {
                    self.to_string()
                }
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse { detail };

        (status, Json(body)).into_response()
    }
}
