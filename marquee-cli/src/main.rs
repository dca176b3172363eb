//! Marquee — register a JustWatch list's movies with Radarr.
//!
//! # Usage
//!
//! ```text
//! marquee [--dry-run] [--env-file <PATH>]
//! ```
//!
//! Configuration comes from the environment (optionally seeded from `.env`).
//! Exits `0` when the batch completes, even if individual titles failed, and
//! `1` when configuration, log rotation, or the initial fetch fails.

mod logging;
mod output;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use marquee_core::{config::load_dotenv, log_rotation, Config};
use marquee_sync::Clients;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "marquee",
    version,
    about = "Register the movies on a JustWatch list with Radarr",
    long_about = None,
)]
struct Cli {
    /// Resolve titles and report what would be added without registering anything.
    #[arg(long)]
    dry_run: bool,

    /// Load variables from this file instead of `./.env`.
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Sync failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    load_dotenv(cli.env_file.as_deref())?;
    let config = Config::from_env().context("invalid configuration")?;

    if let Some(path) = &config.log_file {
        log_rotation::rotate_if_needed(path, log_rotation::MAX_LOG_BYTES)
            .with_context(|| format!("failed to rotate log file {}", path.display()))?;
    }
    logging::init(config.log_file.as_deref())?;

    let clients = Clients::from_config(&config);
    let mut write_failure = None;
    let report = clients
        .run(&config, cli.dry_run, |item| {
            if write_failure.is_none() {
                write_failure = output::write_item(&mut io::stdout().lock(), item).err();
            }
        })
        .inspect_err(|err| {
            tracing::error!(error = %err, "sync aborted during fetch");
        })?;

    if let Some(err) = write_failure {
        return Err(err).context("failed to write report");
    }
    output::write_summary(&mut io::stdout().lock(), &report, cli.dry_run)
        .context("failed to write report")?;
    tracing::info!(
        added = report.added_count(),
        failed = report.failed_count(),
        "sync completed"
    );
    Ok(())
}
