//! Video API handlers.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use clipdock_models::{Video, VideoId};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::services::upload::{parse_media_type, stage_field, ACCEPTED_VIDEO_TYPE};
use crate::state::AppState;

/// Thumbnail media types accepted for inline storage.
const ACCEPTED_THUMBNAIL_TYPES: &[&str] = &["image/jpeg", "image/png"];

#[derive(Deserialize)]
pub struct CreateVideoRequest {
    pub title: String,
}

/// Create a new video record owned by the caller.
pub async fn create_video(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateVideoRequest>,
) -> ApiResult<(StatusCode, Json<Video>)> {
    if req.title.trim().is_empty() {
        return Err(ApiError::bad_request("Title must not be empty"));
    }

    let video = Video::new(user.user_id, req.title.trim());
    state.store.insert(video.clone()).await?;

    info!("Created video {} for user {}", video.id, user.user_id);
    Ok((StatusCode::CREATED, Json(video)))
}

/// Fetch a video record. Owner only.
pub async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    user: AuthUser,
) -> ApiResult<Json<Video>> {
    let video = authorize_owner(&state, &video_id, &user).await?;
    Ok(Json(video))
}

/// Upload a video file for a record.
///
/// Runs the full ingestion pipeline: gate, intake, staging, faststart
/// normalization, aspect classification, keyed storage upload, URL commit.
pub async fn upload_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    user: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<Video>> {
    let video = authorize_owner(&state, &video_id, &user).await?;

    let mut intake: Option<(NamedTempFile, String)> = None;
    while let Some(mut field) = next_field(&mut multipart).await? {
        if field.name() != Some("video") {
            continue;
        }

        let declared = field
            .content_type()
            .ok_or_else(|| ApiError::bad_request("Missing Content-Type for video"))?;
        let media_type = parse_media_type(declared);
        if media_type != ACCEPTED_VIDEO_TYPE {
            warn!("Rejected upload with media type {}", media_type);
            return Err(ApiError::UnsupportedMediaType(media_type));
        }

        // Content type validated; only now does anything touch the disk
        let staged = stage_field(&mut field).await?;
        intake = Some((staged, media_type));
        break;
    }

    let (staged, media_type) =
        intake.ok_or_else(|| ApiError::bad_request("Missing `video` form field"))?;

    let updated = state.pipeline().process(video, staged, &media_type).await?;
    Ok(Json(updated))
}

/// Upload a thumbnail image for a record, stored inline as a data URL.
pub async fn upload_thumbnail(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    user: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<Video>> {
    let mut video = authorize_owner(&state, &video_id, &user).await?;

    let mut intake: Option<(axum::body::Bytes, String)> = None;
    while let Some(field) = next_field(&mut multipart).await? {
        if field.name() != Some("thumbnail") {
            continue;
        }

        let declared = field
            .content_type()
            .ok_or_else(|| ApiError::bad_request("Missing Content-Type for thumbnail"))?;
        let media_type = parse_media_type(declared);
        if !ACCEPTED_THUMBNAIL_TYPES.contains(&media_type.as_str()) {
            return Err(ApiError::UnsupportedMediaType(media_type));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read thumbnail: {e}")))?;
        intake = Some((data, media_type));
        break;
    }

    let (data, media_type) =
        intake.ok_or_else(|| ApiError::bad_request("Missing `thumbnail` form field"))?;
    if data.len() > state.config.max_thumbnail_size {
        return Err(ApiError::bad_request("Thumbnail exceeds size limit"));
    }

    video.thumbnail_url = Some(format!(
        "data:{};base64,{}",
        media_type,
        STANDARD.encode(&data)
    ));
    video.updated_at = chrono::Utc::now();
    state.store.update(video.clone()).await?;

    Ok(Json(video))
}

/// Request Gate: resolve the record and check ownership.
///
/// A mismatch yields a detail-free unauthorized response; existence of the
/// record is not revealed to non-owners.
async fn authorize_owner(state: &AppState, video_id: &str, user: &AuthUser) -> ApiResult<Video> {
    let id =
        VideoId::parse(video_id).map_err(|e| ApiError::InvalidIdentifier(e.to_string()))?;

    let video = state.store.get(&id).await?;
    if !video.is_owned_by(&user.user_id) {
        return Err(ApiError::Unauthorized);
    }
    Ok(video)
}

/// Advance the multipart stream, mapping read errors to bad requests.
async fn next_field<'a>(
    multipart: &'a mut Multipart,
) -> ApiResult<Option<axum::extract::multipart::Field<'a>>> {
    multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {e}")))
}
