//! Axum HTTP API server.
//!
//! This crate provides:
//! - The video upload ingestion pipeline (stage, normalize, classify,
//!   upload, commit)
//! - Bearer JWT authentication
//! - Owner-scoped video record endpoints

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use services::UploadPipeline;
pub use state::AppState;
