//! Trait interfaces between the Cadence crates:
//! - [`SignalSource`] — per-day event lookup (cadence-sources implements)
//! - [`HabitLog`] — bulk habit-log read (cadence-sources implements)
//! - [`ScoreCalculator`] — the recurrence math (cadence-engine implements)
//! - [`StateStore`] — durable state persistence (cadence-store implements)

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{SourceError, StoreError};
use crate::types::{HabitRow, Signal};

/// Answers "did the qualifying event happen on day D?".
///
/// A failure must surface as an error, never as `false`: a day silently
/// defaulted to "no signal" would compound a wrong penalty into every
/// later score.
#[async_trait]
pub trait SignalSource: Send + Sync {
    async fn occurred_on(&self, day: NaiveDate) -> Result<bool, SourceError>;
}

/// Bulk reader for the habit log.
///
/// Returns one row per logged day with raw per-habit values. Rows dated
/// after `today` (at the tracker offset) are excluded by the source.
#[async_trait]
pub trait HabitLog: Send + Sync {
    async fn fetch_rows(&self, today: NaiveDate) -> Result<Vec<HabitRow>, SourceError>;
}

/// Pure per-day score update.
///
/// Implementations must be deterministic functions of their direct inputs
/// so backfill stays reproducible and testable in isolation.
pub trait ScoreCalculator: Send + Sync {
    /// The multiplier a signal earns.
    fn multiplier(&self, signal: &Signal) -> f64;

    /// Next score from the previous score and the day's signal.
    ///
    /// Default implementation: `previous * multiplier(signal)`.
    fn next(&self, previous: f64, signal: &Signal) -> f64 {
        previous * self.multiplier(signal)
    }
}

/// Durable load/save for a tracker state.
///
/// `load` returns `Ok(None)` when nothing has been persisted yet (first
/// run — not an error) and an error for content that exists but does not
/// match the schema: corrupt history must never be silently reset.
pub trait StateStore<S>: Send + Sync {
    fn load(&self) -> Result<Option<S>, StoreError>;
    fn save(&self, state: &S) -> Result<(), StoreError>;
}
