// Adapters - External system implementations

pub mod download_ytdlp;
pub mod exec_ffmpeg;
pub mod probe_ffprobe;
pub mod toml_config;
pub mod tracing_log;
pub mod transcript_json;

// Re-export adapters
pub use download_ytdlp::YtDlpAdapter;
pub use exec_ffmpeg::FfmpegAdapter;
pub use probe_ffprobe::FfprobeAdapter;
pub use toml_config::{ClipperConfig, TomlConfigAdapter};
pub use tracing_log::init_tracing;
pub use transcript_json::JsonTranscriptAdapter;
