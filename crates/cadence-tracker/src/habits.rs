//! Multi-habit tracker.
//!
//! The habit log is the authoritative ledger: every run bulk-reads it and
//! rebuilds the state from the seed score, so a corrected sheet cell is
//! reflected on the next run. Rows are sorted by parsed calendar date
//! before folding; each habit runs its own recurrence over the shared
//! date axis.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::info;

use cadence_core::error::TrackerError;
use cadence_core::traits::{HabitLog, ScoreCalculator, StateStore};
use cadence_core::types::{
    HabitDay, HabitKind, HabitRecord, HabitRow, HabitSpec, HabitValue, MultiHabitState,
};

/// The habit set of the original tracker: counted pushups and reading
/// against fixed targets, plus a morning-walk checkbox.
pub fn default_habits() -> Vec<HabitSpec> {
    vec![
        HabitSpec::counted("pushups", 15.0),
        HabitSpec::checkbox("morningWalk"),
        HabitSpec::counted("reading", 20.0),
    ]
}

/// Fold log rows into a fresh [`MultiHabitState`].
///
/// Rows are sorted ascending by parsed date (stable, so duplicate dates
/// keep their log order). A habit missing from a row reads as zero /
/// unchecked, exactly as a blank sheet cell does.
pub fn rebuild(
    mut rows: Vec<HabitRow>,
    specs: &[HabitSpec],
    calc: &dyn ScoreCalculator,
    seed: f64,
) -> MultiHabitState {
    rows.sort_by_key(|row| row.day);

    let mut state = MultiHabitState::seeded(specs.iter().map(|s| s.name.as_str()), seed);
    for row in rows {
        let mut scores = BTreeMap::new();
        for spec in specs {
            let value = row.values.get(&spec.name).copied().unwrap_or(match spec.kind {
                HabitKind::Count => HabitValue::Count(0.0),
                HabitKind::Checkbox => HabitValue::Done(false),
            });
            let previous = state
                .current_scores
                .get(&spec.name)
                .copied()
                .unwrap_or(seed);
            let score = calc.next(previous, &value.signal(spec.target));
            scores.insert(
                spec.name.clone(),
                HabitRecord {
                    score,
                    value,
                    target: spec.target,
                    achieved: value.achieved(spec.target),
                },
            );
        }
        state.record_day(HabitDay { date: row.date, scores });
    }
    state
}

/// Outcome of one habit-tracker run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitRunSummary {
    /// Days present in the rebuilt history.
    pub days_recorded: usize,
    /// Habits tracked.
    pub habit_count: usize,
}

/// The multi-habit tracker: fetch, rebuild, persist.
pub struct HabitTracker<'a> {
    log: &'a dyn HabitLog,
    calc: &'a dyn ScoreCalculator,
    store: &'a dyn StateStore<MultiHabitState>,
    specs: Vec<HabitSpec>,
    seed: f64,
}

impl<'a> HabitTracker<'a> {
    pub fn new(
        log: &'a dyn HabitLog,
        calc: &'a dyn ScoreCalculator,
        store: &'a dyn StateStore<MultiHabitState>,
        specs: Vec<HabitSpec>,
        seed: f64,
    ) -> Self {
        Self { log, calc, store, specs, seed }
    }

    /// Rebuild the habit state from the log through `today` and persist it.
    ///
    /// A log read failure leaves the previously persisted state untouched.
    pub async fn run(&self, today: NaiveDate) -> Result<HabitRunSummary, TrackerError> {
        let rows = self
            .log
            .fetch_rows(today)
            .await
            .map_err(|source| TrackerError::HabitLog { source })?;

        let state = rebuild(rows, &self.specs, self.calc, self.seed);
        self.store.save(&state)?;

        info!(
            days = state.history.len(),
            habits = self.specs.len(),
            "habit state rebuilt"
        );
        Ok(HabitRunSummary {
            days_recorded: state.history.len(),
            habit_count: self.specs.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cadence_core::error::{SourceError, StoreError};
    use cadence_core::types::HabitValue;
    use cadence_engine::ScoreEngine;
    use std::sync::Mutex;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    fn row(date: &str, day: NaiveDate, cells: &[(&str, HabitValue)]) -> HabitRow {
        HabitRow {
            date: date.to_string(),
            day,
            values: cells.iter().map(|(n, v)| (n.to_string(), *v)).collect(),
        }
    }

    fn specs() -> Vec<HabitSpec> {
        default_habits()
    }

    #[test]
    fn default_habits_match_the_original_targets() {
        let habits = default_habits();
        assert_eq!(habits.len(), 3);
        assert_eq!(habits[0].target, Some(15.0));
        assert_eq!(habits[1].target, None);
        assert_eq!(habits[2].target, Some(20.0));
    }

    #[test]
    fn rebuild_runs_independent_recurrences() {
        let calc = ScoreEngine::default();
        let rows = vec![row(
            "15/05/2025",
            d(2025, 5, 15),
            &[
                ("pushups", HabitValue::Count(20.0)),   // met: 20/15
                ("morningWalk", HabitValue::Done(false)),
                ("reading", HabitValue::Count(12.0)),   // 0.6: miss
            ],
        )];

        let state = rebuild(rows, &specs(), &calc, 1.0);

        assert_eq!(state.history.len(), 1);
        let day = &state.history[0];
        assert!(approx(day.scores["pushups"].score, 1.01));
        assert!(approx(day.scores["morningWalk"].score, 0.99));
        assert!(approx(day.scores["reading"].score, 0.99));
        assert!(day.scores["pushups"].achieved);
        assert!(!day.scores["reading"].achieved);
        assert_eq!(state.current_scores["pushups"], day.scores["pushups"].score);
    }

    #[test]
    fn near_miss_holds_the_habit_flat() {
        let calc = ScoreEngine::default();
        let rows = vec![row(
            "15/05/2025",
            d(2025, 5, 15),
            &[("pushups", HabitValue::Count(12.0))], // 12/15 = 0.8
        )];

        let state = rebuild(rows, &specs(), &calc, 1.0);
        let rec = &state.history[0].scores["pushups"];
        assert_eq!(rec.score, 1.0);
        assert!(!rec.achieved);
    }

    #[test]
    fn rows_are_sorted_by_parsed_date() {
        let calc = ScoreEngine::default();
        let rows = vec![
            row("17/05/2025", d(2025, 5, 17), &[("pushups", HabitValue::Count(15.0))]),
            row("15/05/2025", d(2025, 5, 15), &[("pushups", HabitValue::Count(0.0))]),
            row("16/05/2025", d(2025, 5, 16), &[("pushups", HabitValue::Count(15.0))]),
        ];

        let state = rebuild(rows, &specs(), &calc, 1.0);

        let dates: Vec<&str> = state.history.iter().map(|h| h.date.as_str()).collect();
        assert_eq!(dates, vec!["15/05/2025", "16/05/2025", "17/05/2025"]);
        // Fold order matters: 0.99 * 1.01 * 1.01.
        assert!(approx(state.current_scores["pushups"], 0.99 * 1.01 * 1.01));
    }

    #[test]
    fn missing_cells_read_as_zero() {
        let calc = ScoreEngine::default();
        let rows = vec![row("15/05/2025", d(2025, 5, 15), &[])];

        let state = rebuild(rows, &specs(), &calc, 1.0);
        let day = &state.history[0];

        // A blank day is a missed day for every habit kind.
        assert!(approx(day.scores["pushups"].score, 0.99));
        assert!(approx(day.scores["reading"].score, 0.99));
        assert!(approx(day.scores["morningWalk"].score, 0.99));
        assert_eq!(day.scores["morningWalk"].value, HabitValue::Done(false));
        assert!(!day.scores["pushups"].achieved);
    }

    #[test]
    fn extrema_maps_cover_the_whole_series() {
        let calc = ScoreEngine::default();
        let rows = vec![
            row("15/05/2025", d(2025, 5, 15), &[("pushups", HabitValue::Count(20.0))]),
            row("16/05/2025", d(2025, 5, 16), &[("pushups", HabitValue::Count(0.0))]),
            row("17/05/2025", d(2025, 5, 17), &[("pushups", HabitValue::Count(0.0))]),
        ];

        let state = rebuild(rows, &specs(), &calc, 1.0);

        assert!(approx(state.highest_scores["pushups"], 1.01));
        assert!(approx(state.lowest_scores["pushups"], 1.01 * 0.99 * 0.99));
        assert!(approx(state.current_scores["pushups"], 1.01 * 0.99 * 0.99));
    }

    #[test]
    fn empty_log_rebuilds_seeded_state() {
        let calc = ScoreEngine::default();
        let state = rebuild(Vec::new(), &specs(), &calc, 1.0);
        assert!(state.history.is_empty());
        assert_eq!(state.current_scores["pushups"], 1.0);
        assert_eq!(state.highest_scores["morningWalk"], 1.0);
    }

    // --- HabitTracker::run ---

    struct FixedLog {
        rows: Vec<HabitRow>,
        fail: bool,
    }

    #[async_trait]
    impl HabitLog for FixedLog {
        async fn fetch_rows(&self, _today: NaiveDate) -> Result<Vec<HabitRow>, SourceError> {
            if self.fail {
                return Err(SourceError::Status { provider: "sheets", status: 403 });
            }
            Ok(self.rows.clone())
        }
    }

    struct MemoryStore {
        slot: Mutex<Option<MultiHabitState>>,
    }

    impl StateStore<MultiHabitState> for MemoryStore {
        fn load(&self) -> Result<Option<MultiHabitState>, StoreError> {
            Ok(self.slot.lock().unwrap().clone())
        }

        fn save(&self, state: &MultiHabitState) -> Result<(), StoreError> {
            *self.slot.lock().unwrap() = Some(state.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn run_rebuilds_and_persists() {
        let log = FixedLog {
            rows: vec![row(
                "15/05/2025",
                d(2025, 5, 15),
                &[("pushups", HabitValue::Count(15.0))],
            )],
            fail: false,
        };
        let calc = ScoreEngine::default();
        let store = MemoryStore { slot: Mutex::new(None) };
        let tracker = HabitTracker::new(&log, &calc, &store, specs(), 1.0);

        let summary = tracker.run(d(2025, 5, 15)).await.unwrap();

        assert_eq!(summary.days_recorded, 1);
        assert_eq!(summary.habit_count, 3);
        let saved = store.slot.lock().unwrap().clone().unwrap();
        assert!(approx(saved.current_scores["pushups"], 1.01));
    }

    #[tokio::test]
    async fn log_failure_leaves_persisted_state_alone() {
        let calc = ScoreEngine::default();
        let store = MemoryStore { slot: Mutex::new(None) };

        // Seed the store with a prior good state.
        let good = rebuild(
            vec![row("15/05/2025", d(2025, 5, 15), &[("pushups", HabitValue::Count(15.0))])],
            &specs(),
            &calc,
            1.0,
        );
        store.save(&good).unwrap();

        let log = FixedLog { rows: Vec::new(), fail: true };
        let tracker = HabitTracker::new(&log, &calc, &store, specs(), 1.0);
        let err = tracker.run(d(2025, 5, 16)).await.unwrap_err();

        assert!(matches!(err, TrackerError::HabitLog { .. }));
        assert_eq!(store.slot.lock().unwrap().clone().unwrap(), good);
    }
}
