//! cadence-score — daily commit-score batch update.
//!
//! Loads the persisted progress state, backfills every unrecorded day up
//! to today (commit check per day against the configured repository),
//! and writes the updated state back for the rendering site. Exits
//! non-zero on any failure; an interrupted backfill persists the days
//! that succeeded so the next run resumes after them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use tracing::info;

use cadence_core::constants::SCORE_STATE_FILE;
use cadence_core::date::today_at_offset;
use cadence_engine::ScoreEngine;
use cadence_sources::GithubCommitSource;
use cadence_store::JsonFileStore;
use cadence_tracker::{ScoreTracker, TrackerConfig};

mod config;

use config::Config;

/// Cadence commit-score tracker.
#[derive(Parser, Debug)]
#[command(
    name = "cadence-score",
    version,
    about = "Backfill the daily commit progress score"
)]
struct Args {
    /// Data directory holding the persisted state
    #[arg(long, default_value = None)]
    data_dir: Option<PathBuf>,

    /// Process days up to this date instead of today (YYYY-MM-DD)
    #[arg(long, value_parser = parse_day)]
    today: Option<NaiveDate>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, default_value = "text")]
    log_format: String,
}

fn parse_day(value: &str) -> Result<NaiveDate, String> {
    value
        .parse()
        .map_err(|_| format!("not a YYYY-MM-DD date: {value}"))
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cadence")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, &args.log_format);

    let config = Config::from_env().context("Failed to load commit tracker configuration")?;
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);
    let today = args.today.unwrap_or_else(|| today_at_offset(Utc::now()));

    info!(
        owner = %config.owner,
        repo = %config.repo,
        data_dir = %data_dir.display(),
        %today,
        "Starting cadence-score"
    );

    let tracker_config = TrackerConfig::default();
    let source = GithubCommitSource::new(config.owner, config.repo, config.token);
    let engine = ScoreEngine::new(tracker_config.tuning);
    let store = JsonFileStore::new(data_dir.join(SCORE_STATE_FILE));
    let tracker = ScoreTracker::new(&source, &engine, &store, tracker_config);

    let summary = tracker
        .run(today)
        .await
        .context("Commit score backfill failed")?;

    info!(
        days_recorded = summary.days_recorded,
        current_score = summary.current_score,
        "Backfill complete"
    );
    Ok(())
}

/// Initialize tracing subscriber with the given log level and output format.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_level(true))
            .init();
    }
}
