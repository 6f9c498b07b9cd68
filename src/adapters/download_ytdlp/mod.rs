// yt-dlp adapter - Fetches remote videos to a local file

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::ports::*;

/// Format selector preferring an mp4 video track with an m4a audio track
const FORMAT_SELECTOR: &str = "bestvideo[ext=mp4]+bestaudio[ext=m4a]/mp4";

/// yt-dlp based download adapter
pub struct YtDlpAdapter {
    ytdlp_path: PathBuf,
}

impl YtDlpAdapter {
    pub fn new(ytdlp_path: impl Into<PathBuf>) -> Self {
        Self {
            ytdlp_path: ytdlp_path.into(),
        }
    }

    /// Arguments for downloading `url` into `dest`
    pub fn build_args(url: &str, dest: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "-f",
            FORMAT_SELECTOR,
            "--merge-output-format",
            "mp4",
            "--no-cache-dir",
            "-o",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        args.push(dest.as_os_str().to_os_string());
        args.push(url.into());
        args
    }
}

#[async_trait]
impl DownloadPort for YtDlpAdapter {
    async fn download(&self, url: &str, dest: &Path) -> DomainResult<()> {
        let args = Self::build_args(url, dest);
        debug!("{} {:?}", self.ytdlp_path.display(), args);
        info!("Downloading {} to {}", url, dest.display());

        let output = Command::new(&self.ytdlp_path)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                DomainError::Download(format!(
                    "Failed to start {}: {}",
                    self.ytdlp_path.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(DomainError::Download(format!(
                "yt-dlp exited with {} for {}: {}",
                output.status,
                url,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        if !dest.is_file() {
            return Err(DomainError::Download(format!(
                "yt-dlp finished but {} was not written",
                dest.display()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args() {
        let args: Vec<String> = YtDlpAdapter::build_args(
            "https://example.com/watch?v=1",
            Path::new("out/downloaded_video.mp4"),
        )
        .into_iter()
        .map(|a| a.to_string_lossy().to_string())
        .collect();

        assert_eq!(args[0], "-f");
        assert_eq!(args[1], "bestvideo[ext=mp4]+bestaudio[ext=m4a]/mp4");
        assert!(args.contains(&"--no-cache-dir".to_string()));
        assert_eq!(args[args.len() - 2], "out/downloaded_video.mp4");
        assert_eq!(args[args.len() - 1], "https://example.com/watch?v=1");
    }

    #[tokio::test]
    async fn test_missing_executable_is_download_error() {
        let adapter = YtDlpAdapter::new("/nonexistent/yt-dlp");
        let result = adapter
            .download("https://example.com/v", Path::new("/tmp/never.mp4"))
            .await;
        assert!(matches!(result, Err(DomainError::Download(_))));
    }
}
