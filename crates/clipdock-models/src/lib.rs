//! Shared data models for the clipdock backend.
//!
//! This crate provides Serde-serializable types for:
//! - Video records and their identifiers
//! - Owner identities

pub mod video;

pub use video::{InvalidVideoId, Video, VideoId};
