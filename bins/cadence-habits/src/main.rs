//! cadence-habits — daily habit-score batch update.
//!
//! Bulk-reads the habit spreadsheet, rebuilds every habit's score series
//! from the seed, and overwrites the persisted state for the rendering
//! site. The sheet is the ledger of record, so a corrected cell is
//! reflected on the next run. Exits non-zero on any failure, leaving the
//! previous state untouched.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use tracing::info;

use cadence_core::constants::{HABIT_STATE_FILE, INITIAL_SCORE};
use cadence_core::date::today_at_offset;
use cadence_engine::ScoreEngine;
use cadence_sources::SheetHabitLog;
use cadence_store::JsonFileStore;
use cadence_tracker::{default_habits, HabitTracker};

mod config;

use config::Config;

/// Cadence multi-habit tracker.
#[derive(Parser, Debug)]
#[command(
    name = "cadence-habits",
    version,
    about = "Rebuild the daily habit scores from the habit log"
)]
struct Args {
    /// Data directory holding the persisted state
    #[arg(long, default_value = None)]
    data_dir: Option<PathBuf>,

    /// Include log rows up to this date instead of today (YYYY-MM-DD)
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

    let config = Config::from_env().context("Failed to load habit tracker configuration")?;
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);
    let today = args.today.unwrap_or_else(|| today_at_offset(Utc::now()));

    info!(
        spreadsheet = %config.spreadsheet_id,
        range = %config.range,
        data_dir = %data_dir.display(),
        %today,
        "Starting cadence-habits"
    );

    let habits = default_habits();
    let log = SheetHabitLog::new(
        config.spreadsheet_id,
        config.range,
        config.api_key,
        habits.clone(),
    );
    let engine = ScoreEngine::default();
    let store = JsonFileStore::new(data_dir.join(HABIT_STATE_FILE));
    let tracker = HabitTracker::new(&log, &engine, &store, habits, INITIAL_SCORE);

    let summary = tracker
        .run(today)
        .await
        .context("Habit score rebuild failed")?;

    info!(
        days_recorded = summary.days_recorded,
        habits = summary.habit_count,
        "Rebuild complete"
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
