//! Video record models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a video record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(pub Uuid);

/// Error returned when a path segment is not a valid video ID.
#[derive(Debug, Error)]
#[error("invalid video ID: {0}")]
pub struct InvalidVideoId(pub String);

impl VideoId {
    /// Generate a new random video ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse from a string representation.
    pub fn parse(s: &str) -> Result<Self, InvalidVideoId> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidVideoId(s.to_string()))
    }
}

impl Default for VideoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VideoId {
    type Err = InvalidVideoId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Uuid> for VideoId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// A video record owned by a user.
///
/// `video_url` is written only after a fully committed upload; a failed
/// pipeline run leaves the prior value untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    /// Unique video ID
    pub id: VideoId,

    /// User ID (owner)
    pub owner_id: Uuid,

    /// Video title
    pub title: String,

    /// Public URL of the uploaded video, if one has been committed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    /// Thumbnail URL (data URL), if one has been uploaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Video {
    /// Create a new video record for an owner.
    pub fn new(owner_id: Uuid, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: VideoId::new(),
            owner_id,
            title: title.into(),
            video_url: None,
            thumbnail_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the given user owns this record.
    pub fn is_owned_by(&self, user_id: &Uuid) -> bool {
        self.owner_id == *user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_id_generation() {
        let id1 = VideoId::new();
        let id2 = VideoId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_video_id_parse_roundtrip() {
        let id = VideoId::new();
        let parsed = VideoId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_video_id_parse_rejects_garbage() {
        assert!(VideoId::parse("not-a-uuid").is_err());
        assert!(VideoId::parse("").is_err());
    }

    #[test]
    fn test_video_creation() {
        let owner = Uuid::new_v4();
        let video = Video::new(owner, "Test Video");

        assert_eq!(video.title, "Test Video");
        assert!(video.is_owned_by(&owner));
        assert!(video.video_url.is_none());
        assert!(video.thumbnail_url.is_none());
    }

    #[test]
    fn test_video_serializes_without_empty_urls() {
        let video = Video::new(Uuid::new_v4(), "t");
        let json = serde_json::to_value(&video).unwrap();
        assert!(json.get("video_url").is_none());
        assert!(json.get("thumbnail_url").is_none());
    }
}
