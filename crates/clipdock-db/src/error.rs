//! Record store error types.

use clipdock_models::VideoId;
use thiserror::Error;

/// Result type for record store operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors that can occur during record store operations.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Video not found: {0}")]
    NotFound(VideoId),

    #[error("Persistence failed: {0}")]
    Persistence(String),
}

impl DbError {
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}
