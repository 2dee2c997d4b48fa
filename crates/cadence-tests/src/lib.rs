//! Cross-crate test harness for the Cadence trackers.

pub mod helpers;
