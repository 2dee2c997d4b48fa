//! Tracker defaults. All of these are starting values for explicit
//! configuration, not process-wide tuning knobs: trackers receive their
//! own copies at construction time.

use chrono::NaiveDate;

/// Score every tracker starts from before the first recorded day.
pub const INITIAL_SCORE: f64 = 1.0;

/// Multiplier applied on a day the signal occurred (or the target was met).
pub const DEFAULT_SUCCESS_MULT: f64 = 1.01;

/// Multiplier applied on a day the signal did not occur (or the target was
/// clearly missed).
pub const DEFAULT_FAILURE_MULT: f64 = 0.99;

/// Achievement ratio at or above which a missed target is held flat
/// instead of penalized.
pub const DEFAULT_NEAR_MISS_RATIO: f64 = 0.8;

/// Fixed reference offset for day boundaries: UTC+5:30.
///
/// Day classification must not depend on the machine's local timezone;
/// every deployment slices days at this offset.
pub const TRACKER_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// First calendar day the single-signal tracker covers.
pub const EPOCH_YMD: (i32, u32, u32) = (2025, 5, 15);

/// The tracker epoch as a [`NaiveDate`].
pub fn tracker_epoch() -> NaiveDate {
    let (y, m, d) = EPOCH_YMD;
    NaiveDate::from_ymd_opt(y, m, d).expect("epoch constant is a valid date")
}

/// File name of the persisted single-signal state.
pub const SCORE_STATE_FILE: &str = "progress.json";

/// File name of the persisted multi-habit state.
pub const HABIT_STATE_FILE: &str = "habits.json";
