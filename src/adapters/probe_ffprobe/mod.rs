//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe` as a child process and reads its JSON report.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// FFprobe-based probe adapter
pub struct FfprobeAdapter {
    ffprobe_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ProbeReport {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    index: usize,
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

impl FfprobeAdapter {
    /// Create new FFprobe adapter for the given executable
    pub fn new(ffprobe_path: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }

    /// Arguments passed to ffprobe before the input path
    pub fn probe_args() -> [&'static str; 6] {
        [
            "-v",
            "error",
            "-show_entries",
            "format=duration:stream=index,codec_type,codec_name,width,height",
            "-of",
            "json",
        ]
    }

    /// Parse the JSON printed by ffprobe
    pub fn parse_report(json: &str) -> DomainResult<MediaInfo> {
        let report: ProbeReport = serde_json::from_str(json)
            .map_err(|e| DomainError::Probe(format!("Malformed ffprobe output: {}", e)))?;

        let raw_duration = report
            .format
            .and_then(|f| f.duration)
            .ok_or_else(|| DomainError::Probe("ffprobe reported no duration".to_string()))?;
        let seconds: f64 = raw_duration.trim().parse().map_err(|e| {
            DomainError::Probe(format!("Failed to parse duration '{}': {}", raw_duration, e))
        })?;
        let duration = MediaDuration::new(seconds)?;

        let streams = report
            .streams
            .into_iter()
            .map(|s| StreamInfo {
                index: s.index,
                kind: StreamKind::from_codec_type(s.codec_type.as_deref().unwrap_or_default()),
                codec: s.codec_name,
                width: s.width,
                height: s.height,
            })
            .collect();

        Ok(MediaInfo::new(duration, streams))
    }
}

#[async_trait]
impl ProbePort for FfprobeAdapter {
    async fn probe(&self, path: &Path) -> DomainResult<MediaInfo> {
        debug!("Probing {} with {}", path.display(), self.ffprobe_path.display());

        let output = Command::new(&self.ffprobe_path)
            .args(Self::probe_args())
            .arg(path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                DomainError::Probe(format!(
                    "Failed to run {}: {}",
                    self.ffprobe_path.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainError::Probe(format!(
                "ffprobe failed on {}: {}",
                path.display(),
                stderr.trim()
            )));
        }

        Self::parse_report(&String::from_utf8_lossy(&output.stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report_with_streams() {
        let json = r#"{
            "programs": [],
            "streams": [
                {"index": 0, "codec_name": "h264", "codec_type": "video", "width": 1920, "height": 1080},
                {"index": 1, "codec_name": "aac", "codec_type": "audio"}
            ],
            "format": {"duration": "125.040000"}
        }"#;

        let info = FfprobeAdapter::parse_report(json).unwrap();
        assert_eq!(info.duration.seconds(), 125.04);
        assert_eq!(info.streams.len(), 2);
        assert_eq!(info.streams[1].kind, StreamKind::Audio);
        assert_eq!(info.video_dimensions(), Some((1920, 1080)));
    }

    #[test]
    fn test_parse_report_missing_duration() {
        let json = r#"{"streams": [], "format": {}}"#;
        assert!(matches!(
            FfprobeAdapter::parse_report(json),
            Err(DomainError::Probe(_))
        ));

        let no_format = r#"{"streams": []}"#;
        assert!(matches!(
            FfprobeAdapter::parse_report(no_format),
            Err(DomainError::Probe(_))
        ));
    }

    #[test]
    fn test_parse_report_malformed() {
        assert!(matches!(
            FfprobeAdapter::parse_report("not json"),
            Err(DomainError::Probe(_))
        ));
        assert!(matches!(
            FfprobeAdapter::parse_report(r#"{"format": {"duration": "N/A"}}"#),
            Err(DomainError::Probe(_))
        ));
        assert!(matches!(
            FfprobeAdapter::parse_report(r#"{"format": {"duration": "-3"}}"#),
            Err(DomainError::Probe(_))
        ));
    }

    #[tokio::test]
    async fn test_probe_missing_executable() {
        let adapter = FfprobeAdapter::new("/nonexistent/ffprobe");
        let result = adapter.probe(Path::new("video.mp4")).await;
        assert!(matches!(result, Err(DomainError::Probe(_))));
    }
}
