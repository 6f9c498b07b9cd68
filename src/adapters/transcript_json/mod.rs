//! Timed-text reader for highlight selection
//!
//! Reads speech-to-text output saved as JSON, either the Whisper layout
//! (`{"segments": [...]}`) or a bare array of `{start, end, text}` objects.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::TranscriptSegment;
use crate::ports::*;
use crate::utils::path::sidecar_transcript;

#[derive(Deserialize)]
#[serde(untagged)]
enum TranscriptDocument {
    Whisper { segments: Vec<TranscriptSegment> },
    Bare(Vec<TranscriptSegment>),
}

/// JSON transcript adapter
#[derive(Debug, Clone, Default)]
pub struct JsonTranscriptAdapter {
    explicit: Option<PathBuf>,
}

impl JsonTranscriptAdapter {
    /// Read `<stem>.json` next to each media file
    pub fn sidecar() -> Self {
        Self { explicit: None }
    }

    /// Always read the given file, whatever media is transcribed
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            explicit: Some(path.into()),
        }
    }

    /// Transcript file consulted for `media`
    pub fn transcript_path(&self, media: &Path) -> PathBuf {
        self.explicit
            .clone()
            .unwrap_or_else(|| sidecar_transcript(media))
    }

    pub fn parse(json: &str) -> DomainResult<Vec<TranscriptSegment>> {
        let document: TranscriptDocument = serde_json::from_str(json)
            .map_err(|e| DomainError::Transcription(format!("Malformed transcript: {}", e)))?;

        let segments = match document {
            TranscriptDocument::Whisper { segments } => segments,
            TranscriptDocument::Bare(segments) => segments,
        };

        if let Some(bad) = segments
            .iter()
            .find(|s| !s.start.is_finite() || !s.end.is_finite())
        {
            return Err(DomainError::Transcription(format!(
                "Transcript segment '{}' has non-finite timing",
                bad.text
            )));
        }

        Ok(segments)
    }
}

#[async_trait]
impl TranscribePort for JsonTranscriptAdapter {
    async fn transcribe(&self, path: &Path) -> DomainResult<Vec<TranscriptSegment>> {
        let transcript = self.transcript_path(path);
        debug!("Reading transcript {}", transcript.display());

        let content = tokio::fs::read_to_string(&transcript).await.map_err(|e| {
            DomainError::Transcription(format!(
                "Failed to read transcript {}: {}",
                transcript.display(),
                e
            ))
        })?;

        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_whisper_layout() {
        let segments = JsonTranscriptAdapter::parse(
            r#"{"text": "hi there", "segments": [
                {"id": 0, "start": 1.5, "end": 4.0, "text": " hi"},
                {"id": 1, "start": 4.0, "end": 6.0, "text": " there"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start, 1.5);
        assert_eq!(segments[1].text, " there");
    }

    #[test]
    fn test_parse_bare_array() {
        let segments =
            JsonTranscriptAdapter::parse(r#"[{"start": 0, "end": 2.5, "text": "hello"}]"#).unwrap();
        assert_eq!(segments[0].end, 2.5);

        assert!(JsonTranscriptAdapter::parse("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            JsonTranscriptAdapter::parse(r#"{"segments": "nope"}"#),
            Err(DomainError::Transcription(_))
        ));
        assert!(matches!(
            JsonTranscriptAdapter::parse(r#"[{"start": 0, "text": "no end"}]"#),
            Err(DomainError::Transcription(_))
        ));
    }

    #[test]
    fn test_transcript_path() {
        let media = Path::new("videos/talk.mp4");
        assert_eq!(
            JsonTranscriptAdapter::sidecar().transcript_path(media),
            PathBuf::from("videos/talk.json")
        );
        assert_eq!(
            JsonTranscriptAdapter::from_file("t.json").transcript_path(media),
            PathBuf::from("t.json")
        );
    }

    #[tokio::test]
    async fn test_transcribe_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"start": 2, "end": 5, "text": "moment"}}]"#).unwrap();

        let adapter = JsonTranscriptAdapter::from_file(file.path());
        let segments = adapter.transcribe(Path::new("ignored.mp4")).await.unwrap();
        assert_eq!(segments[0].text, "moment");
    }

    #[tokio::test]
    async fn test_missing_sidecar_is_transcription_error() {
        let result = JsonTranscriptAdapter::sidecar()
            .transcribe(Path::new("/nonexistent/talk.mp4"))
            .await;
        assert!(matches!(result, Err(DomainError::Transcription(_))));
    }
}
