//! Application state.

use std::sync::Arc;

use clipdock_db::{MemoryVideoStore, VideoStore};
use clipdock_media::{FfmpegTool, VideoTool};
use clipdock_storage::{ObjectStore, S3Client};

use crate::config::ApiConfig;
use crate::services::UploadPipeline;

/// Shared application state.
///
/// Collaborators are held behind capability traits so tests can run the
/// full router with deterministic fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub storage: Arc<dyn ObjectStore>,
    pub store: Arc<dyn VideoStore>,
    pub tool: Arc<dyn VideoTool>,
}

impl AppState {
    /// Create new application state with production collaborators.
    pub async fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let storage = S3Client::from_env().await?;
        let tool = FfmpegTool::new(config.tool_timeout);

        Ok(Self {
            config,
            storage: Arc::new(storage),
            store: Arc::new(MemoryVideoStore::new()),
            tool: Arc::new(tool),
        })
    }

    /// Create state with explicit collaborators (used by tests).
    pub fn with_collaborators(
        config: ApiConfig,
        storage: Arc<dyn ObjectStore>,
        store: Arc<dyn VideoStore>,
        tool: Arc<dyn VideoTool>,
    ) -> Self {
        Self {
            config,
            storage,
            store,
            tool,
        }
    }

    /// Build an upload pipeline over this state's collaborators.
    pub fn pipeline(&self) -> UploadPipeline {
        UploadPipeline::new(
            Arc::clone(&self.storage),
            Arc::clone(&self.store),
            Arc::clone(&self.tool),
        )
    }
}
