// Merge interactor - Joins a directory of clips into one file

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::app::workspace::{discover_videos, ensure_output_dir};
use crate::domain::clip_spec::{concat_list, ClipSpecBuilder, CONCAT_LIST_FILE_NAME, MERGED_FILE_NAME};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::path::natural_order_key;

/// Interactor for concatenating finished clips
pub struct MergeInteractor {
    transcode_port: Arc<dyn TranscodePort>,
    builder: ClipSpecBuilder,
}

impl MergeInteractor {
    pub fn new(transcode_port: Arc<dyn TranscodePort>, builder: ClipSpecBuilder) -> Self {
        Self {
            transcode_port,
            builder,
        }
    }

    /// Stream-copy every clip in `clips_dir` into `<output_dir>/merged.mp4`.
    ///
    /// Clips are joined in natural name order (`clip_2` before `clip_10`); an
    /// earlier `merged.mp4` in the directory is never fed back in.
    pub async fn execute(&self, source: &ClipSource, output_dir: &Path) -> DomainResult<ClipOutcome> {
        let clips_dir = match source {
            ClipSource::Local(path) => path,
            ClipSource::Remote(url) => {
                return Err(DomainError::BadArgs(format!(
                    "Merge needs a local directory of clips, got {}",
                    url
                )))
            }
        };

        let clips = Self::ordered_clips(clips_dir)?;
        if clips.is_empty() {
            return Err(DomainError::BadArgs(format!(
                "No clips to merge in {}",
                clips_dir.display()
            )));
        }

        ensure_output_dir(output_dir).await?;

        let mut absolute = Vec::with_capacity(clips.len());
        for clip in &clips {
            let path = tokio::fs::canonicalize(clip).await.map_err(|e| {
                DomainError::Io(format!("Failed to resolve {}: {}", clip.display(), e))
            })?;
            absolute.push(path);
        }

        let list = output_dir.join(CONCAT_LIST_FILE_NAME);
        tokio::fs::write(&list, concat_list(&absolute))
            .await
            .map_err(|e| DomainError::Io(format!("Failed to write {}: {}", list.display(), e)))?;
        debug!("Concat list {} names {} clip(s)", list.display(), absolute.len());

        info!("Merging {} clip(s) from {}", clips.len(), clips_dir.display());
        let spec = self.builder.build_merge(&list, output_dir);
        self.transcode_port.transcode(&spec).await?;

        let mut outcome = ClipOutcome::new(clips_dir, output_dir);
        outcome.outputs.push(spec.output().to_path_buf());
        Ok(outcome)
    }

    fn ordered_clips(clips_dir: &Path) -> DomainResult<Vec<PathBuf>> {
        let mut clips: Vec<PathBuf> = discover_videos(clips_dir)?
            .into_iter()
            .filter(|p| p.file_name().map_or(true, |name| name != MERGED_FILE_NAME))
            .collect();
        clips.sort_by_cached_key(|p| natural_order_key(p));
        Ok(clips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_ordered_clips_uses_numeric_suffix_and_skips_merged() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["clip_10.mp4", "clip_2.mp4", "clip_1.mp4", "merged.mp4", "clip_1.jpg"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let names: Vec<String> = MergeInteractor::ordered_clips(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["clip_1.mp4", "clip_2.mp4", "clip_10.mp4"]);
    }
}
