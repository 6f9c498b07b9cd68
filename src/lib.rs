//! clipsplit video splitter library
//!
//! Plans fixed-length segments over a source video (optionally restricted to
//! a time window) and drives ffmpeg to write each one as its own file.
//! Directories can be processed in batch, and a single transcript-selected
//! highlight can be cut with its text burned in. Finished clips can be
//! merged back into one file, and each clip can get a JPEG preview.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::{DomainError, DomainResult};
pub use domain::model::{ClipMode, ClipOutcome, ClipSettings, ClipSource, TimeWindow};
