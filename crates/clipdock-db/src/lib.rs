//! Video record store.
//!
//! This crate provides:
//! - The `VideoStore` capability trait consumed by the API
//! - An in-memory implementation backing tests and single-node deployments

pub mod error;
pub mod memory;
pub mod store;

pub use error::{DbError, DbResult};
pub use memory::MemoryVideoStore;
pub use store::VideoStore;
