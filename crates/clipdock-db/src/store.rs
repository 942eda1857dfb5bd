//! Record store capability trait.

use async_trait::async_trait;
use clipdock_models::{Video, VideoId};

use crate::error::DbResult;

/// Owner-scoped video record store.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Fetch a record by identifier.
    async fn get(&self, id: &VideoId) -> DbResult<Video>;

    /// Create a new record.
    async fn insert(&self, video: Video) -> DbResult<()>;

    /// Persist an updated record. Last write wins; no per-record locking.
    async fn update(&self, video: Video) -> DbResult<()>;
}
