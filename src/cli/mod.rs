//! CLI module for clipsplit
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::model::{ClipMode, ClipSettings, ClipSource, TimeWindow};

pub mod args;
pub mod commands;

/// Split a video (or a folder of videos) into fixed-length clips
#[derive(Parser, Debug)]
#[command(name = "clipsplit")]
#[command(about = "Split videos into fixed-length clips with ffmpeg")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Video file, http(s) URL, or directory with --batch or --merge
    pub input: String,

    /// Directory receiving the clips
    pub output_dir: PathBuf,

    /// Length of each clip in seconds (not used by --merge)
    #[arg(allow_negative_numbers = true, required_unless_present = "merge")]
    pub clip_duration: Option<f64>,

    #[command(flatten)]
    pub clip: args::ClipArgs,

    #[command(flatten)]
    pub engine: args::EngineArgs,

    #[command(flatten)]
    pub output: args::OutputArgs,
}

impl Cli {
    pub fn source(&self) -> ClipSource {
        ClipSource::parse(&self.input)
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(
            self.clip.start.map(|t| t.seconds),
            self.clip.end.map(|t| t.seconds),
        )
    }

    pub fn mode(&self) -> ClipMode {
        if self.clip.highlight {
            ClipMode::OverlayHighlight
        } else if self.clip.audio_only {
            ClipMode::AudioOnly
        } else if self.clip.vertical {
            ClipMode::CropScale
        } else {
            ClipMode::CopyStreams
        }
    }

    /// Splitting options for the clip and batch pipelines
    pub fn settings(&self) -> ClipSettings {
        ClipSettings::new(self.clip_duration.unwrap_or_default(), self.mode())
            .with_window(self.window())
            .with_full_audio(self.clip.full_audio)
            .with_thumbnails(self.clip.thumbnails)
    }
}
