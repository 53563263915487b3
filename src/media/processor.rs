// ABOUTME: Video probing and thumbnail extraction through the ffprobe and ffmpeg executables
// ABOUTME: The VideoProcessor trait lets the upload pipeline run against a fake in tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use calisthenics_core::constants::uploads::THUMBNAIL_OFFSET_SECONDS;
use calisthenics_core::errors::{AppError, AppResult};
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::config::MediaToolConfig;

/// Media operations needed by the video upload pipeline
#[async_trait]
pub trait VideoProcessor: Send + Sync {
    /// Duration of the video in seconds
    async fn probe_duration(&self, video: &Path) -> AppResult<f64>;

    /// Write a single JPEG frame taken shortly after the start of `video`
    async fn extract_thumbnail(&self, video: &Path, thumbnail: &Path) -> AppResult<()>;
}

/// [`VideoProcessor`] backed by the ffmpeg command line tools
#[derive(Debug, Clone)]
pub struct FfmpegProcessor {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl FfmpegProcessor {
    #[must_use]
    pub fn new(config: &MediaToolConfig) -> Self {
        Self {
            ffmpeg: config.ffmpeg_path.clone(),
            ffprobe: config.ffprobe_path.clone(),
        }
    }

    async fn run(program: &Path, mut command: Command) -> AppResult<Vec<u8>> {
        let tool = program.display().to_string();
        let output = command
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| AppError::external_tool(&tool, format!("failed to launch: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::external_tool(
                tool,
                format!("exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl VideoProcessor for FfmpegProcessor {
    async fn probe_duration(&self, video: &Path) -> AppResult<f64> {
        let mut command = Command::new(&self.ffprobe);
        command
            .args(["-v", "error", "-print_format", "json", "-show_format", "-show_streams"])
            .arg(video);
        let stdout = Self::run(&self.ffprobe, command).await?;

        let duration = parse_probe_duration(&stdout)?;
        debug!(video = %video.display(), duration, "Probed video");
        Ok(duration)
    }

    async fn extract_thumbnail(&self, video: &Path, thumbnail: &Path) -> AppResult<()> {
        let offset = THUMBNAIL_OFFSET_SECONDS.to_string();
        let mut command = Command::new(&self.ffmpeg);
        command
            .args(["-v", "error", "-ss", offset.as_str(), "-i"])
            .arg(video)
            .args(["-vframes", "1", "-y"])
            .arg(thumbnail);
        Self::run(&self.ffmpeg, command).await?;

        debug!(thumbnail = %thumbnail.display(), "Extracted thumbnail");
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Duration from ffprobe JSON: the first video stream's, else the container's
///
/// # Errors
///
/// Returns an error if the JSON is malformed, has no video stream or carries no
/// usable duration
pub fn parse_probe_duration(json: &[u8]) -> AppResult<f64> {
    let probe: ProbeOutput = serde_json::from_slice(json)
        .map_err(|e| AppError::external_tool("ffprobe", format!("unreadable output: {e}")))?;

    let stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| AppError::external_tool("ffprobe", "no video stream found"))?;

    stream
        .duration
        .as_deref()
        .or_else(|| probe.format.as_ref().and_then(|f| f.duration.as_deref()))
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| AppError::external_tool("ffprobe", "video duration unavailable"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_duration_preferred() {
        let json = br#"{
            "streams": [
                {"codec_type": "audio", "duration": "99.0"},
                {"codec_type": "video", "duration": "65.480000"}
            ],
            "format": {"duration": "70.0"}
        }"#;
        let duration = parse_probe_duration(json).expect("duration");
        assert!((duration - 65.48).abs() < f64::EPSILON);
    }

    #[test]
    fn test_falls_back_to_container_duration() {
        let json = br#"{
            "streams": [{"codec_type": "video"}],
            "format": {"duration": "12.5"}
        }"#;
        let duration = parse_probe_duration(json).expect("duration");
        assert!((duration - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_audio_only_is_rejected() {
        let json = br#"{"streams": [{"codec_type": "audio", "duration": "3.0"}]}"#;
        assert!(parse_probe_duration(json).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(parse_probe_duration(b"not json").is_err());
    }

    #[tokio::test]
    async fn test_missing_executable_reports_tool_error() {
        let processor = FfmpegProcessor::new(&MediaToolConfig {
            ffmpeg_path: PathBuf::from("/nonexistent/ffmpeg"),
            ffprobe_path: PathBuf::from("/nonexistent/ffprobe"),
        });
        let err = processor
            .probe_duration(Path::new("clip.mp4"))
            .await
            .expect_err("launch should fail");
        assert_eq!(
            err.code,
            calisthenics_core::errors::ErrorCode::ExternalToolFailed
        );
    }
}
