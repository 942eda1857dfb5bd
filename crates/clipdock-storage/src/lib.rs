//! S3 object storage client.
//!
//! This crate provides:
//! - Streaming file upload to S3
//! - Aspect-prefixed random object key derivation
//! - Public object URL construction
//! - The `ObjectStore` capability trait

pub mod client;
pub mod error;
pub mod keys;

pub use client::{ObjectStore, S3Client, S3Config};
pub use error::{StorageError, StorageResult};
pub use keys::{public_object_url, random_object_key};
