// Duration resolver - Reads source length through the probe port

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::ProbePort;

/// Resolves the duration (and stream layout) of a source file
pub struct DurationResolver {
    probe_port: Arc<dyn ProbePort>,
}

impl DurationResolver {
    pub fn new(probe_port: Arc<dyn ProbePort>) -> Self {
        Self { probe_port }
    }

    /// Total source duration in seconds
    pub async fn resolve(&self, source: &Path) -> DomainResult<MediaDuration> {
        Ok(self.resolve_info(source).await?.duration)
    }

    /// Full probe result, for modes that need stream geometry
    pub async fn resolve_info(&self, source: &Path) -> DomainResult<MediaInfo> {
        let info = self.probe_port.probe(source).await?;
        debug!(
            "Probed {}: duration {}, {} stream(s)",
            source.display(),
            info.duration,
            info.streams.len()
        );
        Ok(info)
    }
}
