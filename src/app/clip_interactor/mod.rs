// Clip interactor - Orchestrates the split-into-clips use case

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::app::duration_resolver::DurationResolver;
use crate::app::workspace::{acquire_source, ensure_output_dir};
use crate::domain::clip_spec::ClipSpecBuilder;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Interactor for splitting one source into clips
pub struct ClipInteractor {
    resolver: DurationResolver,
    transcode_port: Arc<dyn TranscodePort>,
    download_port: Arc<dyn DownloadPort>,
    builder: ClipSpecBuilder,
}

impl ClipInteractor {
    /// Create new clip interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        transcode_port: Arc<dyn TranscodePort>,
        download_port: Arc<dyn DownloadPort>,
        builder: ClipSpecBuilder,
    ) -> Self {
        Self {
            resolver: DurationResolver::new(probe_port),
            transcode_port,
            download_port,
            builder,
        }
    }

    /// Split a local file or downloaded URL into `output_dir`
    pub async fn execute(
        &self,
        source: &ClipSource,
        output_dir: &Path,
        settings: &ClipSettings,
    ) -> DomainResult<ClipOutcome> {
        settings.validate()?;
        ensure_output_dir(output_dir).await?;
        let local = acquire_source(self.download_port.as_ref(), source, output_dir).await?;
        self.clip_file(&local, output_dir, settings).await
    }

    /// Run the pipeline for one local file.
    ///
    /// Each clip is transcoded to completion before the next one is built;
    /// the first failure aborts the file.
    pub async fn clip_file(
        &self,
        source: &Path,
        output_dir: &Path,
        settings: &ClipSettings,
    ) -> DomainResult<ClipOutcome> {
        settings.validate()?;
        ensure_output_dir(output_dir).await?;

        let mut outcome = ClipOutcome::new(source, output_dir);

        if settings.full_audio {
            info!("Extracting full audio track of {}", source.display());
            let spec = self.builder.build_full_audio(source, output_dir);
            self.transcode_port.transcode(&spec).await?;
            outcome.outputs.push(spec.output().to_path_buf());
            return Ok(outcome);
        }

        SegmentPlanner::validate_clip_duration(settings.clip_duration)?;

        let mut flags = ClipFlags::default();
        let duration = if settings.mode == ClipMode::CropScale {
            let media_info = self.resolver.resolve_info(source).await?;
            flags = flags.with_video_dimensions(media_info.video_dimensions());
            media_info.duration
        } else {
            self.resolver.resolve(source).await?
        };

        let region = WindowClamper::clamp(duration, &settings.window)?;
        let plan = SegmentPlanner::plan(region, settings.clip_duration)?;
        info!(
            "Splitting {} ({}) into {} {} clip(s) of up to {}s",
            source.display(),
            duration,
            plan.len(),
            settings.mode,
            settings.clip_duration
        );

        for segment in &plan {
            let spec = self
                .builder
                .build(&segment, source, output_dir, settings.mode, &flags)?;
            debug!("Clip {}: {}", segment.index, segment);
            self.transcode_port.transcode(&spec).await?;
            outcome.outputs.push(spec.output().to_path_buf());

            if settings.thumbnails {
                let thumbnail = self.builder.build_thumbnail(spec.output(), segment.length());
                self.transcode_port.transcode(&thumbnail).await?;
                outcome.thumbnails.push(thumbnail.output().to_path_buf());
            }
        }

        Ok(outcome)
    }
}
