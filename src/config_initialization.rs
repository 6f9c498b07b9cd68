//! Configuration initialization and hierarchy management

use anyhow::{Context, Result};

use crate::adapters::toml_config::{ClipperConfig, TomlConfigAdapter};
use crate::cli::Cli;

/// Resolve configuration following precedence: CLI > Env > File > Defaults.
///
/// Environment values arrive through the same clap fields as flags, so a flag
/// beats its variable and both beat the file.
pub fn initialize_configuration(cli: &Cli) -> Result<ClipperConfig> {
    let mut config = TomlConfigAdapter::discover(cli.engine.config.as_deref())
        .context("Failed to load configuration")?;

    apply_cli_overrides(&mut config, cli);
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Apply flag and environment overrides on top of file values
pub fn apply_cli_overrides(config: &mut ClipperConfig, cli: &Cli) {
    let engine = &cli.engine;
    if let Some(path) = &engine.ffmpeg_path {
        config.engine.ffmpeg_path = path.clone();
    }
    if let Some(path) = &engine.ffprobe_path {
        config.engine.ffprobe_path = path.clone();
    }
    if let Some(path) = &engine.ytdlp_path {
        config.engine.ytdlp_path = path.clone();
    }
    if let Some(secs) = engine.timeout {
        config.engine.transcode_timeout_secs = Some(secs);
    }

    let output = &cli.output;
    if let Some(level) = &output.log_level {
        config.log.level = level.clone();
    }
    if output.log_json {
        config.log.json = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[engine]\nffmpeg_path = \"/file/ffmpeg\"\nffprobe_path = \"/file/ffprobe\"\n[log]\nlevel = \"warn\""
        )
        .unwrap();
        let config_path = file.path().to_string_lossy().to_string();

        let cli = Cli::try_parse_from([
            "clipsplit",
            "in.mp4",
            "out",
            "60",
            "--config",
            config_path.as_str(),
            "--ffmpeg-path",
            "/flag/ffmpeg",
            "--timeout",
            "30",
            "--log-level",
            "debug",
        ])
        .unwrap();

        let config = initialize_configuration(&cli).unwrap();
        assert_eq!(config.engine.ffmpeg_path, PathBuf::from("/flag/ffmpeg"));
        assert_eq!(config.engine.ffprobe_path, PathBuf::from("/file/ffprobe"));
        assert_eq!(config.engine.transcode_timeout_secs, Some(30));
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let cli = Cli::try_parse_from(["clipsplit", "in.mp4", "out", "60", "--timeout", "0"]).unwrap();
        let mut config = ClipperConfig::default();
        apply_cli_overrides(&mut config, &cli);
        assert!(config.validate().is_err());
    }
}
