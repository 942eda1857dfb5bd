//! Capability trait over the external media tools.
//!
//! The upload pipeline depends on this trait rather than on the concrete
//! ffmpeg/ffprobe invocations, so tests can substitute deterministic fakes.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::MediaResult;
use crate::faststart::normalize_faststart;
use crate::probe::{probe_dimensions, Dimensions};

/// External tool capability: normalize a container, probe its streams.
#[async_trait]
pub trait VideoTool: Send + Sync {
    /// Rewrite the container at `input` for progressive playback and return
    /// the path of the new file.
    async fn normalize(&self, input: &Path) -> MediaResult<PathBuf>;

    /// Return the frame dimensions of the first video stream.
    async fn probe(&self, input: &Path) -> MediaResult<Dimensions>;
}

/// Real implementation shelling out to ffmpeg and ffprobe.
#[derive(Debug, Clone)]
pub struct FfmpegTool {
    timeout: Duration,
}

impl FfmpegTool {
    /// Create a tool with a bounded execution timeout per invocation.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl VideoTool for FfmpegTool {
    async fn normalize(&self, input: &Path) -> MediaResult<PathBuf> {
        normalize_faststart(input, self.timeout).await
    }

    async fn probe(&self, input: &Path) -> MediaResult<Dimensions> {
        probe_dimensions(input, self.timeout).await
    }
}
