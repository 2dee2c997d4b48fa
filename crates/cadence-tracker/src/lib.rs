//! # cadence-tracker — Backfill driver and tracker composition.
//!
//! Ties the core seams together: enumerate unrecorded days, query the
//! signal source one day at a time (each score depends on the previous
//! one, so processing is strictly sequential), fold the recurrence, and
//! persist. Holds the per-variant orchestration for the single-signal
//! commit tracker and the multi-habit tracker.

pub mod config;
pub mod driver;
pub mod habits;

pub use config::TrackerConfig;
pub use driver::{extend, pending_dates, RunSummary, ScoreTracker};
pub use habits::{default_habits, rebuild, HabitRunSummary, HabitTracker};
