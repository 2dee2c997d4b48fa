//! Shared test helpers for E2E and integration tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use cadence_core::error::SourceError;
use cadence_core::traits::{HabitLog, SignalSource};
use cadence_core::types::HabitRow;

/// Calendar day shorthand.
pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// The default tracker epoch used across tests.
pub fn epoch() -> NaiveDate {
    day(2025, 5, 15)
}

/// Signal source scripted per day; any unplanned day fails the way a
/// broken upstream would.
pub struct ScriptedSource {
    plan: BTreeMap<NaiveDate, Result<bool, SourceError>>,
}

impl ScriptedSource {
    pub fn new(plan: impl IntoIterator<Item = (NaiveDate, Result<bool, SourceError>)>) -> Self {
        Self { plan: plan.into_iter().collect() }
    }

    /// A run of consecutive days following the given commit pattern.
    pub fn pattern(from: NaiveDate, pattern: &[bool]) -> Self {
        Self::new(
            from.iter_days()
                .zip(pattern.iter())
                .map(|(day, occurred)| (day, Ok(*occurred))),
        )
    }

    /// `count` consecutive commit days starting at `from`.
    pub fn streak(from: NaiveDate, count: usize) -> Self {
        Self::pattern(from, &vec![true; count])
    }
}

#[async_trait]
impl SignalSource for ScriptedSource {
    async fn occurred_on(&self, day: NaiveDate) -> Result<bool, SourceError> {
        self.plan
            .get(&day)
            .cloned()
            .unwrap_or(Err(SourceError::Status { provider: "scripted", status: 500 }))
    }
}

/// Habit log backed by a fixed row set, future rows excluded the same
/// way the sheet source excludes them.
pub struct StaticHabitLog {
    rows: Vec<HabitRow>,
}

impl StaticHabitLog {
    pub fn new(rows: Vec<HabitRow>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl HabitLog for StaticHabitLog {
    async fn fetch_rows(&self, today: NaiveDate) -> Result<Vec<HabitRow>, SourceError> {
        Ok(self
            .rows
            .iter()
            .filter(|row| row.day <= today)
            .cloned()
            .collect())
    }
}
