// Ports - Interface definitions (contracts)
//
// Every external collaborator is reached through one of these traits so the
// pipeline can run against fakes in tests.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for media duration and stream probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe a media file; fails with [`DomainError::Probe`]
    async fn probe(&self, path: &Path) -> DomainResult<MediaInfo>;
}

/// Port for the transcoding engine
#[async_trait]
pub trait TranscodePort: Send + Sync {
    /// Run one clip spec to completion, writing exactly one output file.
    /// Fails with [`DomainError::Transcode`].
    async fn transcode(&self, spec: &ClipSpec) -> DomainResult<()>;
}

/// Port for fetching remote sources
#[async_trait]
pub trait DownloadPort: Send + Sync {
    /// Download `url` to `dest`; fails with [`DomainError::Download`]
    async fn download(&self, url: &str, dest: &Path) -> DomainResult<()>;
}

/// Port for speech-to-text output
#[async_trait]
pub trait TranscribePort: Send + Sync {
    /// Ordered timed text for a media file; fails with [`DomainError::Transcription`]
    async fn transcribe(&self, path: &Path) -> DomainResult<Vec<TranscriptSegment>>;
}
