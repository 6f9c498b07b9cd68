// Output directory preparation and input acquisition shared by interactors

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::domain::errors::*;
use crate::domain::model::ClipSource;
use crate::ports::DownloadPort;
use crate::utils::path::has_video_extension;

/// File name a remote source is saved under inside the output directory
pub const DOWNLOADED_VIDEO_FILE_NAME: &str = "downloaded_video.mp4";

/// Create `dir` and its parents if absent
pub async fn ensure_output_dir(dir: &Path) -> DomainResult<()> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        DomainError::Io(format!(
            "Failed to create output directory {}: {}",
            dir.display(),
            e
        ))
    })?;
    debug!("Output directory ready: {}", dir.display());
    Ok(())
}

/// Local path to process, downloading remote sources into `output_dir` first
pub async fn acquire_source(
    download_port: &dyn DownloadPort,
    source: &ClipSource,
    output_dir: &Path,
) -> DomainResult<PathBuf> {
    match source {
        ClipSource::Local(path) => Ok(path.clone()),
        ClipSource::Remote(url) => {
            let dest = output_dir.join(DOWNLOADED_VIDEO_FILE_NAME);
            download_port.download(url, &dest).await?;
            Ok(dest)
        }
    }
}

/// Video files directly inside `input_dir`, ordered by file name.
///
/// Entries that cannot be read (dangling links, permission errors) are
/// skipped; only an unreadable `input_dir` is an error.
pub fn discover_videos(input_dir: &Path) -> DomainResult<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(DomainError::BadArgs(format!(
            "Input is not a directory: {}",
            input_dir.display()
        )));
    }

    let mut inputs = Vec::new();
    let walker = WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
            Err(e) => {
                return Err(DomainError::Io(format!(
                    "Failed to read {}: {}",
                    input_dir.display(),
                    e
                )))
            }
        };
        if entry.file_type().is_file() && has_video_extension(entry.path()) {
            inputs.push(entry.into_path());
        } else {
            debug!("Skipping {}", entry.path().display());
        }
    }

    Ok(inputs)
}
