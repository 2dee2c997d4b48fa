//! Habit-tracker configuration loaded from environment variables.

use anyhow::{Context, Result};

/// Default habit-log range: date column plus one column per habit.
const DEFAULT_RANGE: &str = "Habit!A2:D";

#[derive(Clone, Debug)]
pub struct Config {
    /// Spreadsheet holding the habit log.
    pub spreadsheet_id: String,
    /// API key authorizing the read.
    pub api_key: String,
    /// Value range to read.
    pub range: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let spreadsheet_id =
            std::env::var("CADENCE_SHEET_ID").context("CADENCE_SHEET_ID is required")?;
        let api_key =
            std::env::var("CADENCE_SHEET_API_KEY").context("CADENCE_SHEET_API_KEY is required")?;
        let range =
            std::env::var("CADENCE_SHEET_RANGE").unwrap_or_else(|_| DEFAULT_RANGE.to_string());

        Ok(Config { spreadsheet_id, api_key, range })
    }
}
