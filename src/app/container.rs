use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::adapters::{
    ClipperConfig, FfmpegAdapter, FfprobeAdapter, JsonTranscriptAdapter, YtDlpAdapter,
};
use crate::app::{
    batch_interactor::BatchInteractor, clip_interactor::ClipInteractor,
    highlight_interactor::HighlightInteractor, merge_interactor::MergeInteractor,
};
use crate::domain::clip_spec::ClipSpecBuilder;
use crate::domain::model::EncodingProfile;
use crate::ports::{DownloadPort, ProbePort, TranscodePort, TranscribePort};

pub trait AppContainer: Send + Sync {
    fn clip_interactor(&self) -> Arc<ClipInteractor>;
    fn batch_interactor(&self) -> Arc<BatchInteractor>;
    fn highlight_interactor(&self) -> Arc<HighlightInteractor>;
    fn merge_interactor(&self) -> Arc<MergeInteractor>;
}

pub struct DefaultAppContainer {
    clip_interactor: Arc<ClipInteractor>,
    batch_interactor: Arc<BatchInteractor>,
    highlight_interactor: Arc<HighlightInteractor>,
    merge_interactor: Arc<MergeInteractor>,
}

impl DefaultAppContainer {
    /// Wire the process-backed adapters from configuration.
    ///
    /// `transcript` overrides the sidecar `<stem>.json` lookup.
    pub fn new(config: &ClipperConfig, transcript: Option<PathBuf>) -> Self {
        let engine = &config.engine;
        let probe_port = Arc::new(FfprobeAdapter::new(&engine.ffprobe_path));
        let transcode_port = Arc::new(
            FfmpegAdapter::new(&engine.ffmpeg_path)
                .with_timeout(engine.transcode_timeout_secs.map(Duration::from_secs)),
        );
        let download_port = Arc::new(YtDlpAdapter::new(&engine.ytdlp_path));
        let transcribe_port = Arc::new(match transcript {
            Some(path) => JsonTranscriptAdapter::from_file(path),
            None => JsonTranscriptAdapter::sidecar(),
        });

        Self::with_ports(
            probe_port,
            transcode_port,
            download_port,
            transcribe_port,
            config.encoding_profile(),
        )
    }

    /// Wire interactors over arbitrary port implementations
    pub fn with_ports(
        probe_port: Arc<dyn ProbePort>,
        transcode_port: Arc<dyn TranscodePort>,
        download_port: Arc<dyn DownloadPort>,
        transcribe_port: Arc<dyn TranscribePort>,
        profile: EncodingProfile,
    ) -> Self {
        let builder = ClipSpecBuilder::new(profile);

        let clip_interactor = Arc::new(ClipInteractor::new(
            Arc::clone(&probe_port),
            Arc::clone(&transcode_port),
            Arc::clone(&download_port),
            builder.clone(),
        ));

        let batch_interactor = Arc::new(BatchInteractor::new(Arc::clone(&clip_interactor)));

        let merge_interactor = Arc::new(MergeInteractor::new(
            Arc::clone(&transcode_port),
            builder.clone(),
        ));

        let highlight_interactor = Arc::new(HighlightInteractor::new(
            probe_port,
            transcribe_port,
            transcode_port,
            download_port,
            builder,
        ));

        Self {
            clip_interactor,
            batch_interactor,
            highlight_interactor,
            merge_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn clip_interactor(&self) -> Arc<ClipInteractor> {
        Arc::clone(&self.clip_interactor)
    }

    fn batch_interactor(&self) -> Arc<BatchInteractor> {
        Arc::clone(&self.batch_interactor)
    }

    fn highlight_interactor(&self) -> Arc<HighlightInteractor> {
        Arc::clone(&self.highlight_interactor)
    }

    fn merge_interactor(&self) -> Arc<MergeInteractor> {
        Arc::clone(&self.merge_interactor)
    }
}
