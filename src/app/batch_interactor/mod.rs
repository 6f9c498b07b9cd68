// Batch interactor - Fans the clip pipeline out over a directory of videos

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::app::clip_interactor::ClipInteractor;
use crate::app::workspace::{discover_videos, ensure_output_dir};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::utils::path::file_stem;

/// What to do when one file in a batch fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Abort the batch on the first failure
    #[default]
    FailFast,
    /// Record the failure and continue with the next file
    KeepGoing,
}

/// Interactor for directory batches
pub struct BatchInteractor {
    clip_interactor: Arc<ClipInteractor>,
}

impl BatchInteractor {
    pub fn new(clip_interactor: Arc<ClipInteractor>) -> Self {
        Self { clip_interactor }
    }

    /// Split every video in the directory into `<output_dir>/<stem>/`
    pub async fn run(
        &self,
        source: &ClipSource,
        output_dir: &Path,
        settings: &ClipSettings,
        policy: BatchPolicy,
    ) -> DomainResult<BatchReport> {
        let input_dir = match source {
            ClipSource::Local(path) => path,
            ClipSource::Remote(url) => {
                return Err(DomainError::BadArgs(format!(
                    "Batch mode needs a local directory, got URL {}",
                    url
                )))
            }
        };

        settings.validate()?;
        let inputs = discover_videos(input_dir)?;
        if inputs.is_empty() {
            warn!("No video files found in {}", input_dir.display());
        }
        ensure_output_dir(output_dir).await?;

        let mut report = BatchReport::default();
        for (position, input) in inputs.iter().enumerate() {
            let stem = file_stem(input).ok_or_else(|| {
                DomainError::BadArgs(format!("Cannot derive a name from {}", input.display()))
            })?;
            let file_output = output_dir.join(stem);
            info!(
                "[{}/{}] Processing {}",
                position + 1,
                inputs.len(),
                input.display()
            );

            match self
                .clip_interactor
                .clip_file(input, &file_output, settings)
                .await
            {
                Ok(outcome) => report.completed.push(outcome),
                Err(e) if policy == BatchPolicy::KeepGoing => {
                    warn!("Failed {}: {}", input.display(), e);
                    report.failed.push(FailedFile {
                        source: input.clone(),
                        error: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Batch finished: {} file(s) done, {} failed, {} output(s)",
            report.completed.len(),
            report.failed.len(),
            report.total_outputs()
        );
        Ok(report)
    }
}
