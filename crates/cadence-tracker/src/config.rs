//! Tracker configuration.
//!
//! One value per tracker instance; nothing here is read from process
//! globals, so the commit and habit trackers can run in the same process
//! with independent epochs, seeds, and tuning.

use chrono::NaiveDate;

use cadence_core::constants::{tracker_epoch, INITIAL_SCORE};
use cadence_engine::Tuning;

/// Configuration for one tracker instance.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// First calendar day the tracker covers.
    pub epoch: NaiveDate,
    /// Score before the first recorded day.
    pub seed: f64,
    /// Recurrence multipliers and thresholds.
    pub tuning: Tuning,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            epoch: tracker_epoch(),
            seed: INITIAL_SCORE,
            tuning: Tuning::default(),
        }
    }
}
