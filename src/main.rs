//! clipsplit CLI
//!
//! Splits a video into fixed-length clips with ffmpeg.
//!
//! # Usage
//!
//! ```bash
//! clipsplit talk.mp4 clips 60
//! clipsplit talk.mp4 clips 30 --start 1:00 --end 5:00 --vertical
//! clipsplit talk.mp4 clips 0 --audio-only --full-audio
//! clipsplit videos/ clips 60 --batch --keep-going
//! clipsplit talk.mp4 clips 0 --highlight --transcript talk.json
//! clipsplit clips clips --merge
//! clipsplit talk.mp4 clips 60 --vertical --thumbnails
//! ```

use clap::Parser;

use clipsplit::cli::{commands, Cli};

/// Main entry point for the clipsplit CLI application
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    if let Err(e) = commands::run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
