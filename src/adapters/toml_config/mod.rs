// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::{AudioProfile, EncodingProfile, OverlayProfile, VideoProfile};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "clipsplit.toml";

/// Locations of the external tools and per-call limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub ffmpeg_path: PathBuf,
    pub ffprobe_path: PathBuf,
    pub ytdlp_path: PathBuf,
    /// Deadline for a single transcode; unset means wait indefinitely
    pub transcode_timeout_secs: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
            ytdlp_path: PathBuf::from("yt-dlp"),
            transcode_timeout_secs: None,
        }
    }
}

/// Logging output options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipperConfig {
    pub engine: EngineConfig,
    pub log: LogConfig,
    pub audio: AudioProfile,
    pub video: VideoProfile,
    pub overlay: OverlayProfile,
}

impl ClipperConfig {
    /// Codec parameters handed to the clip builder
    pub fn encoding_profile(&self) -> EncodingProfile {
        EncodingProfile {
            audio: self.audio.clone(),
            video: self.video.clone(),
            overlay: self.overlay.clone(),
        }
    }

    /// Validate value ranges
    pub fn validate(&self) -> DomainResult<()> {
        if self.video.crf > 51 {
            return Err(DomainError::Config("CRF value cannot exceed 51".to_string()));
        }
        if self.audio.sample_rate == 0 {
            return Err(DomainError::Config("Audio sample rate cannot be zero".to_string()));
        }
        if self.audio.bitrate.trim().is_empty() || self.audio.codec.trim().is_empty() {
            return Err(DomainError::Config(
                "Audio codec and bitrate must be set".to_string(),
            ));
        }
        if self.video.vertical_width == 0
            || self.video.vertical_height == 0
            || self.video.vertical_width % 2 != 0
            || self.video.vertical_height % 2 != 0
        {
            return Err(DomainError::Config(format!(
                "Vertical resolution must be positive and even, got {}x{}",
                self.video.vertical_width, self.video.vertical_height
            )));
        }
        if self.overlay.font_size == 0 {
            return Err(DomainError::Config("Overlay font size cannot be zero".to_string()));
        }
        if self.engine.transcode_timeout_secs == Some(0) {
            return Err(DomainError::Config(
                "Transcode timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse configuration from TOML text; missing keys keep their defaults
    pub fn parse(toml_content: &str) -> DomainResult<ClipperConfig> {
        let config: ClipperConfig = toml::from_str(toml_content)
            .map_err(|e| DomainError::Config(format!("Failed to parse TOML config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file that must exist
    pub fn load(path: &Path) -> DomainResult<ClipperConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::parse(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the explicit file, else the default file if present, else defaults
    pub fn discover(explicit: Option<&Path>) -> DomainResult<ClipperConfig> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            return Self::load(default_path);
        }

        debug!("No config file found, using defaults");
        Ok(ClipperConfig::default())
    }
}
