//! FFprobe stream probing and aspect-ratio classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// Relative tolerance for matching a reference aspect ratio.
///
/// 1% keeps common near-16:9 encodes (1920x1080, 1280x720, 854x480) in the
/// landscape band without admitting 4:3 or square material.
const RATIO_TOLERANCE: f64 = 0.01;

/// Frame dimensions of the first video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Coarse aspect-ratio category, used to namespace storage keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectCategory {
    /// Within tolerance of 16:9
    Landscape,
    /// Within tolerance of 9:16
    Portrait,
    /// Everything else
    Other,
}

impl AspectCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectCategory::Landscape => "landscape",
            AspectCategory::Portrait => "portrait",
            AspectCategory::Other => "other",
        }
    }
}

impl fmt::Display for AspectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    width: Option<i64>,
    height: Option<i64>,
}

/// Probe a video file for the first video stream's frame dimensions.
pub async fn probe_dimensions(
    path: impl AsRef<Path>,
    timeout: Duration,
) -> MediaResult<Dimensions> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    let mut command = Command::new("ffprobe");
    command
        .args(["-v", "error", "-print_format", "json", "-show_streams"])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = match tokio::time::timeout(timeout, command.output()).await {
        Ok(result) => result?,
        Err(_) => return Err(MediaError::Timeout(timeout.as_secs())),
    };

    if !output.status.success() {
        return Err(MediaError::ffprobe_failed(
            "FFprobe exited with non-zero status",
            Some(String::from_utf8_lossy(&output.stderr).to_string()),
        ));
    }

    let dims = parse_dimensions(&output.stdout)?;
    debug!("Probed {}: {}x{}", path.display(), dims.width, dims.height);
    Ok(dims)
}

/// Extract validated dimensions from ffprobe JSON output.
fn parse_dimensions(stdout: &[u8]) -> MediaResult<Dimensions> {
    let probe: FfprobeOutput = serde_json::from_slice(stdout)?;

    let stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type == "video")
        .ok_or_else(|| MediaError::InvalidVideo("no video stream found".to_string()))?;

    let width = stream.width.unwrap_or(0);
    let height = stream.height.unwrap_or(0);
    if width <= 0 || height <= 0 {
        return Err(MediaError::InvalidVideo(format!(
            "non-positive frame dimensions {width}x{height}"
        )));
    }

    Ok(Dimensions {
        width: width as u32,
        height: height as u32,
    })
}

/// Classify frame dimensions into a coarse aspect category.
///
/// The width:height ratio is compared against 16:9 and 9:16 with a relative
/// tolerance band; truncating integer division would misclassify common
/// resolutions and is deliberately avoided.
pub fn classify_aspect(dims: Dimensions) -> AspectCategory {
    let ratio = f64::from(dims.width) / f64::from(dims.height);

    if within_tolerance(ratio, 16.0 / 9.0) {
        AspectCategory::Landscape
    } else if within_tolerance(ratio, 9.0 / 16.0) {
        AspectCategory::Portrait
    } else {
        AspectCategory::Other
    }
}

fn within_tolerance(ratio: f64, reference: f64) -> bool {
    ((ratio - reference) / reference).abs() <= RATIO_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    #[test]
    fn test_classify_landscape() {
        assert_eq!(classify_aspect(dims(1920, 1080)), AspectCategory::Landscape);
        assert_eq!(classify_aspect(dims(1280, 720)), AspectCategory::Landscape);
        assert_eq!(classify_aspect(dims(854, 480)), AspectCategory::Landscape);
    }

    #[test]
    fn test_classify_portrait() {
        assert_eq!(classify_aspect(dims(1080, 1920)), AspectCategory::Portrait);
        assert_eq!(classify_aspect(dims(720, 1280)), AspectCategory::Portrait);
        // 608x1080 is within 1% of 9:16
        assert_eq!(classify_aspect(dims(608, 1080)), AspectCategory::Portrait);
    }

    #[test]
    fn test_classify_other() {
        assert_eq!(classify_aspect(dims(1000, 1000)), AspectCategory::Other);
        assert_eq!(classify_aspect(dims(640, 480)), AspectCategory::Other);
        assert_eq!(classify_aspect(dims(2560, 1080)), AspectCategory::Other);
    }

    #[test]
    fn test_parse_dimensions_first_video_stream() {
        let json = br#"{
            "streams": [
                {"codec_type": "audio", "channels": 2},
                {"codec_type": "video", "width": 1920, "height": 1080},
                {"codec_type": "video", "width": 640, "height": 480}
            ]
        }"#;
        let parsed = parse_dimensions(json).unwrap();
        assert_eq!(parsed, dims(1920, 1080));
    }

    #[test]
    fn test_parse_dimensions_no_video_stream() {
        let json = br#"{"streams": [{"codec_type": "audio"}]}"#;
        let err = parse_dimensions(json).unwrap_err();
        assert!(matches!(err, MediaError::InvalidVideo(_)));
    }

    #[test]
    fn test_parse_dimensions_rejects_non_positive() {
        let json = br#"{"streams": [{"codec_type": "video", "width": 0, "height": 1080}]}"#;
        assert!(parse_dimensions(json).is_err());

        let json = br#"{"streams": [{"codec_type": "video", "width": 1920, "height": -1}]}"#;
        assert!(parse_dimensions(json).is_err());
    }

    #[test]
    fn test_parse_dimensions_empty_streams() {
        assert!(parse_dimensions(br#"{"streams": []}"#).is_err());
        assert!(parse_dimensions(br#"{}"#).is_err());
    }

    #[tokio::test]
    async fn test_probe_missing_file_fails() {
        let err = probe_dimensions("/nonexistent/video.mp4", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }
}
