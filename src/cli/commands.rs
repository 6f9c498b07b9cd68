//! Command implementations

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::adapters::init_tracing;
use crate::app::{AppContainer, BatchPolicy, DefaultAppContainer};
use crate::cli::Cli;
use crate::config_initialization::initialize_configuration;
use crate::domain::model::{BatchReport, ClipOutcome};

/// Execute the command line: load config, set up logging, run one pipeline
pub async fn run(cli: Cli) -> Result<()> {
    let config = initialize_configuration(&cli)?;
    init_tracing(&config.log.level, config.log.json)?;
    debug!("Effective configuration: {:?}", config);

    let container = DefaultAppContainer::new(&config, cli.clip.transcript.clone());
    let source = cli.source();

    if cli.clip.merge {
        let outcome = container
            .merge_interactor()
            .execute(&source, &cli.output_dir)
            .await
            .with_context(|| format!("Failed to merge clips in {}", source))?;
        print_outcome(&outcome, cli.output.json)?;
    } else if cli.clip.highlight {
        let outcome = container
            .highlight_interactor()
            .execute(&source, &cli.output_dir)
            .await
            .with_context(|| format!("Failed to cut highlight from {}", source))?;
        print_outcome(&outcome, cli.output.json)?;
    } else if cli.clip.batch {
        let policy = if cli.clip.keep_going {
            BatchPolicy::KeepGoing
        } else {
            BatchPolicy::FailFast
        };
        let report = container
            .batch_interactor()
            .run(&source, &cli.output_dir, &cli.settings(), policy)
            .await
            .with_context(|| format!("Batch over {} failed", source))?;
        print_batch(&report, cli.output.json)?;

        if !report.failed.is_empty() {
            bail!(
                "{} of {} file(s) failed",
                report.failed.len(),
                report.failed.len() + report.completed.len()
            );
        }
    } else {
        let outcome = container
            .clip_interactor()
            .execute(&source, &cli.output_dir, &cli.settings())
            .await
            .with_context(|| format!("Failed to split {}", source))?;
        print_outcome(&outcome, cli.output.json)?;
    }

    info!("Done");
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    println!("{}", json);
    Ok(())
}

fn print_outcome(outcome: &ClipOutcome, json: bool) -> Result<()> {
    if json {
        return print_json(outcome);
    }
    if outcome.is_noop() {
        println!("No clips written for {}", outcome.source.display());
    }
    for output in outcome.outputs.iter().chain(&outcome.thumbnails) {
        println!("{}", output.display());
    }
    Ok(())
}

fn print_batch(report: &BatchReport, json: bool) -> Result<()> {
    if json {
        return print_json(report);
    }
    for outcome in &report.completed {
        print_outcome(outcome, false)?;
    }
    for failed in &report.failed {
        println!("FAILED {}: {}", failed.source.display(), failed.error);
    }
    println!(
        "{} file(s), {} clip(s), {} failure(s)",
        report.completed.len() + report.failed.len(),
        report.total_outputs(),
        report.failed.len()
    );
    Ok(())
}
