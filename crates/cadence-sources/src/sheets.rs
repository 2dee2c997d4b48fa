//! Google Sheets habit-log source.
//!
//! Bulk-reads the configured value range and turns each row into a
//! [`HabitRow`]: column 0 is a `DD/MM/YYYY` date, the remaining columns
//! follow the configured habit order. Cell parsing is lenient the way the
//! sheet is filled in by hand: a blank or non-numeric count reads as 0,
//! and only the literal `TRUE` checks a checkbox. Rows with unparseable
//! dates are skipped; rows dated after today are excluded.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use cadence_core::date::parse_sheet_day;
use cadence_core::error::SourceError;
use cadence_core::traits::HabitLog;
use cadence_core::types::{HabitKind, HabitRow, HabitSpec, HabitValue};

const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const PROVIDER: &str = "sheets";

/// Response shape of the Sheets `values` endpoint.
#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Habit log backed by one sheet range.
pub struct SheetHabitLog {
    client: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    range: String,
    api_key: String,
    specs: Vec<HabitSpec>,
}

impl SheetHabitLog {
    /// Create a log reader for the given spreadsheet range. `specs` fixes
    /// the habit column order (column 1 onward).
    pub fn new(
        spreadsheet_id: impl Into<String>,
        range: impl Into<String>,
        api_key: impl Into<String>,
        specs: Vec<HabitSpec>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: SHEETS_API.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            range: range.into(),
            api_key: api_key.into(),
            specs,
        }
    }

    /// Point the reader at a different API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn values_url(&self) -> String {
        format!("{}/{}/values/{}", self.base_url, self.spreadsheet_id, self.range)
    }
}

#[async_trait]
impl HabitLog for SheetHabitLog {
    async fn fetch_rows(&self, today: NaiveDate) -> Result<Vec<HabitRow>, SourceError> {
        let response = self
            .client
            .get(self.values_url())
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status { provider: PROVIDER, status: status.as_u16() });
        }

        let range: ValueRange = response
            .json()
            .await
            .map_err(|e| SourceError::Malformed { provider: PROVIDER, detail: e.to_string() })?;

        Ok(parse_rows(&range.values, &self.specs, today))
    }
}

/// Parse raw sheet rows, dropping unparseable dates and future days.
pub fn parse_rows(rows: &[Vec<String>], specs: &[HabitSpec], today: NaiveDate) -> Vec<HabitRow> {
    rows.iter()
        .filter_map(|cells| {
            let row = parse_row(cells, specs);
            if row.is_none() && !cells.is_empty() {
                warn!(date_cell = %cells[0], "skipping habit row with unparseable date");
            }
            row
        })
        .filter(|row| row.day <= today)
        .collect()
}

/// Parse one row; `None` if the date cell is missing or unparseable.
pub fn parse_row(cells: &[String], specs: &[HabitSpec]) -> Option<HabitRow> {
    let date_cell = cells.first()?;
    let day = parse_sheet_day(date_cell)?;

    let mut values = BTreeMap::new();
    for (index, spec) in specs.iter().enumerate() {
        let cell = cells.get(index + 1).map(String::as_str);
        let value = match spec.kind {
            HabitKind::Count => HabitValue::Count(parse_count(cell)),
            HabitKind::Checkbox => HabitValue::Done(parse_checkbox(cell)),
        };
        values.insert(spec.name.clone(), value);
    }

    Some(HabitRow { date: date_cell.clone(), day, values })
}

fn parse_count(cell: Option<&str>) -> f64 {
    cell.and_then(|c| c.trim().parse::<f64>().ok()).unwrap_or(0.0)
}

fn parse_checkbox(cell: Option<&str>) -> bool {
    cell.is_some_and(|c| c.trim() == "TRUE")
}
