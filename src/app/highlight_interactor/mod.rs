// Highlight interactor - Cuts the transcript-selected moment with a text overlay

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::app::duration_resolver::DurationResolver;
use crate::app::workspace::{acquire_source, ensure_output_dir};
use crate::domain::clip_spec::ClipSpecBuilder;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Interactor for the single-highlight use case
pub struct HighlightInteractor {
    resolver: DurationResolver,
    transcribe_port: Arc<dyn TranscribePort>,
    transcode_port: Arc<dyn TranscodePort>,
    download_port: Arc<dyn DownloadPort>,
    builder: ClipSpecBuilder,
}

impl HighlightInteractor {
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        transcribe_port: Arc<dyn TranscribePort>,
        transcode_port: Arc<dyn TranscodePort>,
        download_port: Arc<dyn DownloadPort>,
        builder: ClipSpecBuilder,
    ) -> Self {
        Self {
            resolver: DurationResolver::new(probe_port),
            transcribe_port,
            transcode_port,
            download_port,
            builder,
        }
    }

    /// Produce `clip_1.mp4` from the selected transcript range.
    ///
    /// An empty transcript is not an error: nothing is written and the
    /// returned outcome has no outputs.
    pub async fn execute(&self, source: &ClipSource, output_dir: &Path) -> DomainResult<ClipOutcome> {
        ensure_output_dir(output_dir).await?;
        let local = acquire_source(self.download_port.as_ref(), source, output_dir).await?;
        let mut outcome = ClipOutcome::new(&local, output_dir);

        let segments = self.transcribe_port.transcribe(&local).await?;
        let highlight = match HighlightSelector::select(&segments) {
            Some(highlight) => highlight,
            None => {
                warn!("Transcript of {} is empty, no highlight produced", local.display());
                return Ok(outcome);
            }
        };

        let duration = self.resolver.resolve(&local).await?;
        let region = WindowClamper::clamp(duration, &highlight.window())?;
        let segment = SegmentDescriptor {
            index: 1,
            start: region.offset,
            end: region.end(),
        };
        info!("Highlight {} \"{}\"", segment, highlight.text);

        let flags = ClipFlags::default().with_overlay_text(highlight.text);
        let spec = self.builder.build(
            &segment,
            &local,
            output_dir,
            ClipMode::OverlayHighlight,
            &flags,
        )?;
        self.transcode_port.transcode(&spec).await?;
        outcome.outputs.push(spec.output().to_path_buf());

        Ok(outcome)
    }
}
