//! Faststart container normalization.
//!
//! Rewrites an MP4 container so its index (moov atom) sits at the front of
//! the file, letting players begin playback before the download completes.
//! Audio and video payloads are stream-copied, never re-encoded.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{MediaError, MediaResult};

/// Suffix appended to the input path to derive the normalized output path.
const FASTSTART_SUFFIX: &str = ".faststart";

/// Derive the deterministic output path for a normalized file.
pub fn faststart_output_path(input: impl AsRef<Path>) -> PathBuf {
    let mut os: OsString = input.as_ref().as_os_str().to_os_string();
    os.push(FASTSTART_SUFFIX);
    PathBuf::from(os)
}

/// Normalize a video for progressive playback.
///
/// Writes the normalized file at [`faststart_output_path`] and returns that
/// path. The input file is left in place; callers own its cleanup. On any
/// failure a partially written output file is removed.
pub async fn normalize_faststart(
    input: impl AsRef<Path>,
    timeout: Duration,
) -> MediaResult<PathBuf> {
    let input = input.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;

    let output = faststart_output_path(input);
    debug!("Normalizing {} -> {}", input.display(), output.display());

    let mut command = Command::new("ffmpeg");
    command
        .arg("-y")
        .arg("-v")
        .arg("error")
        .arg("-i")
        .arg(input)
        .args(["-c", "copy", "-movflags", "faststart", "-f", "mp4"])
        .arg(&output)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        // Dropping the timed-out future must not leave ffmpeg running
        .kill_on_drop(true);

    let waited = match tokio::time::timeout(timeout, command.output()).await {
        Ok(result) => result?,
        Err(_) => {
            warn!(
                "FFmpeg timed out after {}s normalizing {}",
                timeout.as_secs(),
                input.display()
            );
            remove_partial(&output).await;
            return Err(MediaError::Timeout(timeout.as_secs()));
        }
    };

    if !waited.status.success() {
        remove_partial(&output).await;
        return Err(MediaError::ffmpeg_failed(
            "FFmpeg exited with non-zero status",
            Some(String::from_utf8_lossy(&waited.stderr).to_string()),
            waited.status.code(),
        ));
    }

    Ok(output)
}

/// Best-effort removal of a partially written output file.
async fn remove_partial(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("Failed to remove partial output {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_appends_marker() {
        let out = faststart_output_path("/tmp/upload-abc.mp4");
        assert_eq!(out, PathBuf::from("/tmp/upload-abc.mp4.faststart"));
    }

    #[test]
    fn test_output_path_is_deterministic() {
        let a = faststart_output_path("/tmp/x.mp4");
        let b = faststart_output_path("/tmp/x.mp4");
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_normalize_missing_input_fails() {
        let err = normalize_faststart("/nonexistent/input.mp4", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }
}
