//! Tracker state types: daily signals, score history, per-habit records.
//!
//! Serialized field names are a stable contract with the rendering site
//! (camelCase, `hadCommit`, map-valued `currentScores`); do not rename.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::date;

/// The daily input fact driving one score update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Signal {
    /// The qualifying event happened (or not) that day.
    Occurred(bool),
    /// A measured value against an optional numeric target.
    ///
    /// A missing (or non-positive) target means "no target configured yet":
    /// the update is a deliberate no-op, not a failure.
    Graded { value: f64, target: Option<f64> },
}

/// One processed day in the single-signal history.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Instant of the day's 00:00 at the tracker offset (ISO-8601 in JSON).
    pub date: DateTime<Utc>,
    /// Score after applying this day's update.
    pub score: f64,
    /// Whether a qualifying commit existed in the day's window.
    pub had_commit: bool,
}

impl HistoryEntry {
    /// Calendar day this entry covers, at the tracker offset.
    pub fn day(&self) -> NaiveDate {
        date::day_of(self.date)
    }
}

/// Persisted single-signal tracker state.
///
/// `history` is chronological with exactly one entry per calendar day and
/// no gaps from the tracker epoch to the last processed day. `current_score`
/// always equals the last entry's score; the extrema cover the seed score
/// and every entry.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreState {
    pub current_score: f64,
    pub highest_score: f64,
    pub lowest_score: f64,
    pub history: Vec<HistoryEntry>,
}

impl ScoreState {
    /// Fresh state before any day has been processed.
    pub fn seeded(seed: f64) -> Self {
        Self {
            current_score: seed,
            highest_score: seed,
            lowest_score: seed,
            history: Vec::new(),
        }
    }

    /// Append a processed day and fold its score into current and extrema.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.current_score = entry.score;
        self.highest_score = self.highest_score.max(entry.score);
        self.lowest_score = self.lowest_score.min(entry.score);
        self.history.push(entry);
    }

    /// Calendar day of the last recorded entry, if any.
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.history.last().map(HistoryEntry::day)
    }
}

/// Raw value of one habit on one day, as read from the habit log.
///
/// Untagged in JSON: counted habits serialize as numbers, checkbox habits
/// as booleans, matching the rendering contract.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(untagged)]
pub enum HabitValue {
    Count(f64),
    Done(bool),
}

impl HabitValue {
    /// The recurrence signal this value produces against `target`.
    ///
    /// Checkbox habits ignore the target; counted habits grade against it.
    pub fn signal(&self, target: Option<f64>) -> Signal {
        match *self {
            Self::Done(done) => Signal::Occurred(done),
            Self::Count(value) => Signal::Graded { value, target },
        }
    }

    /// Whether this value counts as the habit fully achieved.
    pub fn achieved(&self, target: Option<f64>) -> bool {
        match *self {
            Self::Done(done) => done,
            Self::Count(value) => target.is_some_and(|t| value >= t),
        }
    }
}

/// Per-habit outcome of one day: the score after the update plus the raw
/// value it was derived from.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HabitRecord {
    pub score: f64,
    pub value: HabitValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    pub achieved: bool,
}

/// One day in the multi-habit history.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HabitDay {
    /// Date exactly as received from the habit log (`DD/MM/YYYY`).
    pub date: String,
    pub scores: BTreeMap<String, HabitRecord>,
}

/// Persisted multi-habit tracker state.
///
/// Each habit's score series is an independent recurrence sharing the same
/// date axis; the maps are keyed by habit name.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MultiHabitState {
    pub current_scores: BTreeMap<String, f64>,
    pub highest_scores: BTreeMap<String, f64>,
    pub lowest_scores: BTreeMap<String, f64>,
    pub history: Vec<HabitDay>,
}

impl MultiHabitState {
    /// Fresh state with every named habit at the seed score.
    pub fn seeded<'a>(habits: impl IntoIterator<Item = &'a str>, seed: f64) -> Self {
        let seeded: BTreeMap<String, f64> = habits
            .into_iter()
            .map(|name| (name.to_string(), seed))
            .collect();
        Self {
            current_scores: seeded.clone(),
            highest_scores: seeded.clone(),
            lowest_scores: seeded,
            history: Vec::new(),
        }
    }

    /// Append a processed day and fold each habit's score into its
    /// current and extrema entries.
    pub fn record_day(&mut self, day: HabitDay) {
        for (name, record) in &day.scores {
            self.current_scores.insert(name.clone(), record.score);
            self.highest_scores
                .entry(name.clone())
                .and_modify(|h| *h = h.max(record.score))
                .or_insert(record.score);
            self.lowest_scores
                .entry(name.clone())
                .and_modify(|l| *l = l.min(record.score))
                .or_insert(record.score);
        }
        self.history.push(day);
    }
}

/// How a habit's log cell is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HabitKind {
    /// Numeric cell graded against a target (lenient parse, blank reads 0).
    Count,
    /// Checkbox cell; only the literal `TRUE` counts as done.
    Checkbox,
}

/// Configuration of one tracked habit: its log column and success rule.
#[derive(Clone, Debug, PartialEq)]
pub struct HabitSpec {
    /// Habit name, also the key in persisted score maps.
    pub name: String,
    pub kind: HabitKind,
    /// Success target for counted habits; `None` means not configured,
    /// which makes every day's update a no-op for this habit.
    pub target: Option<f64>,
}

impl HabitSpec {
    /// A counted habit with a target.
    pub fn counted(name: impl Into<String>, target: f64) -> Self {
        Self { name: name.into(), kind: HabitKind::Count, target: Some(target) }
    }

    /// A done/not-done checkbox habit.
    pub fn checkbox(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: HabitKind::Checkbox, target: None }
    }
}

/// One row of the habit log: a day's raw values keyed by habit name.
///
/// Not persisted; produced by the habit log source after date parsing and
/// future-row exclusion.
#[derive(Clone, Debug, PartialEq)]
pub struct HabitRow {
    /// Date cell exactly as received (`DD/MM/YYYY`).
    pub date: String,
    /// The parsed calendar day, used for ordering.
    pub day: NaiveDate,
    pub values: BTreeMap<String, HabitValue>,
}
