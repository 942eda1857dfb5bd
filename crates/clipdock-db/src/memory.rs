//! In-memory record store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use clipdock_models::{Video, VideoId};

use crate::error::{DbError, DbResult};
use crate::store::VideoStore;

/// In-memory `VideoStore` backed by a `HashMap`.
#[derive(Clone, Default)]
pub struct MemoryVideoStore {
    videos: Arc<RwLock<HashMap<VideoId, Video>>>,
}

impl MemoryVideoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoStore for MemoryVideoStore {
    async fn get(&self, id: &VideoId) -> DbResult<Video> {
        self.videos
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(DbError::NotFound(*id))
    }

    async fn insert(&self, video: Video) -> DbResult<()> {
        self.videos.write().await.insert(video.id, video);
        Ok(())
    }

    async fn update(&self, video: Video) -> DbResult<()> {
        let mut videos = self.videos.write().await;
        if !videos.contains_key(&video.id) {
            return Err(DbError::NotFound(video.id));
        }
        videos.insert(video.id, video);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemoryVideoStore::new();
        let video = Video::new(Uuid::new_v4(), "clip");

        store.insert(video.clone()).await.unwrap();
        let fetched = store.get(&video.id).await.unwrap();
        assert_eq!(fetched.title, "clip");
    }

    #[tokio::test]
    async fn test_get_missing_record() {
        let store = MemoryVideoStore::new();
        let err = store.get(&VideoId::new()).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_existing_record() {
        let store = MemoryVideoStore::new();
        let mut video = Video::new(Uuid::new_v4(), "clip");
        store.insert(video.clone()).await.unwrap();

        video.video_url = Some("https://example.com/v".to_string());
        store.update(video.clone()).await.unwrap();

        let fetched = store.get(&video.id).await.unwrap();
        assert_eq!(fetched.video_url.as_deref(), Some("https://example.com/v"));
    }

    #[tokio::test]
    async fn test_update_missing_record_fails() {
        let store = MemoryVideoStore::new();
        let video = Video::new(Uuid::new_v4(), "clip");
        let err = store.update(video).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
    }
}
