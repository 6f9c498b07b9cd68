// Tracing log adapter - Structured logging using tracing crate

use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::domain::errors::*;

/// Parse a log level name (`off`, `error`, `warn`, `info`, `debug`, `trace`)
pub fn parse_level(level: &str) -> DomainResult<LevelFilter> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| DomainError::Config(format!("Unknown log level '{}'", level)))
}

/// Install the global subscriber, writing to stderr.
///
/// `level` is the default directive; `RUST_LOG` directives are layered on top.
/// A subscriber that is already installed is left in place.
pub fn init_tracing(level: &str, json: bool) -> DomainResult<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(parse_level(level)?.into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = installed {
        debug!("Tracing subscriber already installed: {}", e);
    }
    Ok(())
}
