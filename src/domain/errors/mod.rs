// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Source duration or stream metadata could not be determined
    #[error("Failed to probe media: {0}")]
    Probe(String),

    /// Start/end window is empty, inverted or negative
    #[error("Invalid time window: {0}")]
    InvalidWindow(String),

    /// Clip duration is not a positive number of seconds
    #[error("Invalid clip duration: {0}")]
    InvalidDuration(String),

    /// Requested mode needs data the flags do not carry
    #[error("Cannot build clip: {0}")]
    Build(String),

    /// Transcoding engine failed or produced no output
    #[error("Transcoding failed: {0}")]
    Transcode(String),

    /// Remote source could not be fetched
    #[error("Download failed: {0}")]
    Download(String),

    /// Transcript could not be obtained or parsed
    #[error("Transcription failed: {0}")]
    Transcription(String),

    /// Configuration file or value is invalid
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),

    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Io(err.to_string())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = std::result::Result<T, DomainError>;
