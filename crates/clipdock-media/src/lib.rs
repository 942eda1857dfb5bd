//! FFmpeg CLI wrapper for video ingestion.
//!
//! This crate provides:
//! - Faststart container normalization (stream copy, index moved up front)
//! - FFprobe stream probing and aspect-ratio classification
//! - The `VideoTool` capability trait abstracting both subprocess calls

pub mod error;
pub mod faststart;
pub mod probe;
pub mod tool;

pub use error::{MediaError, MediaResult};
pub use faststart::{faststart_output_path, normalize_faststart};
pub use probe::{classify_aspect, probe_dimensions, AspectCategory, Dimensions};
pub use tool::{FfmpegTool, VideoTool};
