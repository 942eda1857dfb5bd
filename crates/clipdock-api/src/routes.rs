//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::health::health;
use crate::handlers::videos::{create_video, get_video, upload_thumbnail, upload_video};
use crate::middleware::{cors_layer, request_logging};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let video_routes = Router::new()
        .route("/videos", post(create_video))
        .route("/videos/:video_id", get(get_video))
        .route("/videos/:video_id/upload", post(upload_video))
        // Route-level limit overrides the router-wide upload bound, so an
        // oversized thumbnail fails mid-read instead of buffering in memory
        .route(
            "/videos/:video_id/thumbnail",
            post(upload_thumbnail)
                .layer(DefaultBodyLimit::max(state.config.max_thumbnail_size)),
        );

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health));

    Router::new()
        .nest("/api", video_routes)
        .merge(health_routes)
        // Body size bound: oversized uploads fail while streaming, not
        // after buffering. DefaultBodyLimit raises axum's multipart cap to
        // the same bound.
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(DefaultBodyLimit::max(state.config.max_body_size))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
