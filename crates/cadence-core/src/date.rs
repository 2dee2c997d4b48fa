//! Calendar math at the tracker's fixed UTC+5:30 reference offset.
//!
//! A "day" everywhere in Cadence means a calendar date at this offset.
//! Signal queries receive the day's bounds as UTC instants; persisted
//! single-signal entries store the day-start instant. A fixed offset has
//! no DST transitions, so every day is exactly 24 hours.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::constants::TRACKER_OFFSET_SECS;

/// The fixed reference offset (UTC+5:30).
pub fn tracker_offset() -> FixedOffset {
    FixedOffset::east_opt(TRACKER_OFFSET_SECS).expect("offset constant is in range")
}

/// UTC instant of 00:00 on `day` at the tracker offset.
pub fn day_start_utc(day: NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);
    tracker_offset()
        .from_local_datetime(&midnight)
        .single()
        .expect("fixed offsets map local times uniquely")
        .with_timezone(&Utc)
}

/// Half-open UTC window `[start, end)` covering `day` at the tracker offset.
pub fn day_window(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day_start_utc(day);
    (start, start + Duration::days(1))
}

/// Calendar day that `instant` falls on at the tracker offset.
pub fn day_of(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&tracker_offset()).date_naive()
}

/// Today's calendar day at the tracker offset, given the current instant.
pub fn today_at_offset(now: DateTime<Utc>) -> NaiveDate {
    day_of(now)
}

/// Parse a habit-log date cell in `DD/MM/YYYY` form.
///
/// Returns `None` for anything unparseable; callers skip such rows.
pub fn parse_sheet_day(cell: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(cell.trim(), "%d/%m/%Y").ok()
}
