//! Video upload ingestion pipeline.
//!
//! One invocation per request, stages strictly sequential:
//! stage -> normalize -> classify -> derive key -> upload -> commit.
//! Every local artifact is removed on every exit path; `video_url` is only
//! written after the storage upload has fully committed.

use std::sync::Arc;

use axum::extract::multipart::Field;
use chrono::Utc;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use clipdock_db::VideoStore;
use clipdock_media::{classify_aspect, VideoTool};
use clipdock_storage::{random_object_key, ObjectStore};
use clipdock_models::Video;

use crate::error::{ApiError, ApiResult};

/// The single accepted media type for video uploads.
pub const ACCEPTED_VIDEO_TYPE: &str = "video/mp4";

/// Parse a declared media type, discarding parameters.
///
/// `"video/mp4; codecs=avc1"` -> `"video/mp4"`.
pub fn parse_media_type(raw: &str) -> String {
    raw.split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// Copy a multipart field into a scoped temporary file.
///
/// The returned handle owns the file; dropping it on any path removes the
/// file from disk.
pub async fn stage_field(field: &mut Field<'_>) -> ApiResult<NamedTempFile> {
    let staged = tempfile::Builder::new()
        .prefix("clipdock-upload-")
        .suffix(".mp4")
        .tempfile()
        .map_err(|e| ApiError::Processing(e.into()))?;

    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .open(staged.path())
        .await
        .map_err(|e| ApiError::Processing(e.into()))?;

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read upload body: {e}")))?
    {
        file.write_all(&chunk)
            .await
            .map_err(|e| ApiError::Processing(e.into()))?;
    }
    file.flush()
        .await
        .map_err(|e| ApiError::Processing(e.into()))?;

    debug!("Staged upload at {}", staged.path().display());
    Ok(staged)
}

/// Upload pipeline over the external collaborators.
#[derive(Clone)]
pub struct UploadPipeline {
    storage: Arc<dyn ObjectStore>,
    store: Arc<dyn VideoStore>,
    tool: Arc<dyn VideoTool>,
}

impl UploadPipeline {
    pub fn new(
        storage: Arc<dyn ObjectStore>,
        store: Arc<dyn VideoStore>,
        tool: Arc<dyn VideoTool>,
    ) -> Self {
        Self {
            storage,
            store,
            tool,
        }
    }

    /// Run the pipeline from a staged upload through the committed record.
    ///
    /// Takes ownership of the staged file; it is removed as soon as its
    /// normalized successor exists, or when this function returns on a
    /// failure path. The normalized artifact is removed when this scope
    /// exits, success or not.
    pub async fn process(
        &self,
        mut video: Video,
        staged: NamedTempFile,
        content_type: &str,
    ) -> ApiResult<Video> {
        let normalized_path = self.tool.normalize(staged.path()).await?;
        // Predecessor removed once the successor exists
        drop(staged);

        let normalized = scopeguard::guard(normalized_path, |path| {
            let _ = std::fs::remove_file(&path);
        });

        let dims = self.tool.probe(&normalized).await?;
        let category = classify_aspect(dims);
        debug!(
            "Classified {}x{} as {} for video {}",
            dims.width, dims.height, category, video.id
        );

        let key = random_object_key(category.as_str());
        self.storage
            .put_file(&key, &normalized, content_type)
            .await?;

        video.video_url = Some(self.storage.object_url(&key));
        video.updated_at = Utc::now();
        self.store.update(video.clone()).await?;

        info!("Committed video {} under key {}", video.id, key);
        Ok(video)
    }
}
