//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::domain::model::TimeSpec;

/// What to cut and how to encode it
#[derive(Args, Debug, Clone, Default)]
pub struct ClipArgs {
    /// Start of the window to split (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(long, value_name = "TIME")]
    pub start: Option<TimeSpec>,

    /// End of the window to split (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(long, value_name = "TIME")]
    pub end: Option<TimeSpec>,

    /// Drop video and write mp3 clips
    #[arg(long, conflicts_with = "vertical")]
    pub audio_only: bool,

    /// With --audio-only, write one full_audio.mp3 for the whole input
    #[arg(long, requires = "audio_only")]
    pub full_audio: bool,

    /// Center-crop to 9:16 and scale for vertical video
    #[arg(long)]
    pub vertical: bool,

    /// Cut the first transcript segment with its text burned in
    #[arg(long, conflicts_with_all = ["audio_only", "vertical", "batch", "start", "end"])]
    pub highlight: bool,

    /// Transcript JSON for --highlight (default: <input stem>.json)
    #[arg(long, value_name = "FILE", requires = "highlight")]
    pub transcript: Option<PathBuf>,

    /// Treat the input as a directory of videos
    #[arg(long)]
    pub batch: bool,

    /// In batch mode, continue past failed files and report them at the end
    #[arg(long, requires = "batch")]
    pub keep_going: bool,

    /// Write a 150px-high .jpg preview next to every clip
    #[arg(long, conflicts_with_all = ["audio_only", "highlight"])]
    pub thumbnails: bool,

    /// Join the clips in the input directory into merged.mp4 without re-encoding
    #[arg(
        long,
        conflicts_with_all = [
            "batch", "highlight", "audio_only", "full_audio", "vertical", "start", "end",
            "thumbnails",
        ]
    )]
    pub merge: bool,
}

/// External tools and their limits
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// TOML config file (default: ./clipsplit.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// ffmpeg executable
    #[arg(long, env = "CLIPSPLIT_FFMPEG_PATH", value_name = "PATH")]
    pub ffmpeg_path: Option<PathBuf>,

    /// ffprobe executable
    #[arg(long, env = "CLIPSPLIT_FFPROBE_PATH", value_name = "PATH")]
    pub ffprobe_path: Option<PathBuf>,

    /// yt-dlp executable, used for URL inputs
    #[arg(long, env = "CLIPSPLIT_YTDLP_PATH", value_name = "PATH")]
    pub ytdlp_path: Option<PathBuf>,

    /// Kill a single transcode after this many seconds
    #[arg(long, env = "CLIPSPLIT_TIMEOUT_SECS", value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Logging and report output
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, env = "CLIPSPLIT_LOG_LEVEL", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}
