//! Single-signal backfill driver.
//!
//! Extends a [`ScoreState`] from its last recorded day to today, one
//! calendar day at a time. A day already present in history is never
//! reprocessed; a source failure aborts the fold with every successful
//! day still recorded, so the caller can persist that prefix and a retry
//! resumes where this run stopped.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use cadence_core::date::day_start_utc;
use cadence_core::error::TrackerError;
use cadence_core::traits::{ScoreCalculator, SignalSource, StateStore};
use cadence_core::types::{HistoryEntry, ScoreState, Signal};

use crate::config::TrackerConfig;

/// Days that still need processing: from the day after `last_recorded`
/// (or `epoch` when nothing is recorded) through `today`, ascending.
///
/// `today` earlier than `epoch` is a clock or configuration fault and is
/// rejected loudly; an exhausted range (re-run after completion) is a
/// normal empty result.
pub fn pending_dates(
    last_recorded: Option<NaiveDate>,
    today: NaiveDate,
    epoch: NaiveDate,
) -> Result<Vec<NaiveDate>, TrackerError> {
    if today < epoch {
        return Err(TrackerError::TodayBeforeEpoch { today, epoch });
    }

    // Calendar overflow collapses to an empty range rather than panicking.
    let start = last_recorded.map_or(epoch, |last| last.succ_opt().unwrap_or(NaiveDate::MAX));
    if start > today {
        return Ok(Vec::new());
    }

    Ok(start.iter_days().take_while(|day| *day <= today).collect())
}

/// Extend `state` through `today`. Returns the number of days recorded.
///
/// Strictly sequential: score(i) is a function of score(i-1), so there is
/// no per-day parallelism. On a source error the fold stops immediately;
/// days recorded before the failure remain in `state`.
pub async fn extend(
    state: &mut ScoreState,
    today: NaiveDate,
    source: &dyn SignalSource,
    calc: &dyn ScoreCalculator,
    config: &TrackerConfig,
) -> Result<usize, TrackerError> {
    let pending = pending_dates(state.last_day(), today, config.epoch)?;
    if pending.is_empty() {
        debug!(%today, "history already covers today");
        return Ok(0);
    }

    let mut recorded = 0usize;
    for day in pending {
        let had_commit = source
            .occurred_on(day)
            .await
            .map_err(|source| TrackerError::Signal { day, source })?;

        let score = calc.next(state.current_score, &Signal::Occurred(had_commit));
        state.record(HistoryEntry { date: day_start_utc(day), score, had_commit });
        recorded += 1;
        info!(%day, had_commit, score, "day recorded");
    }

    Ok(recorded)
}

/// Outcome of one tracker run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Days newly recorded by this run.
    pub days_recorded: usize,
    /// Score after the run.
    pub current_score: f64,
}

/// The single-signal tracker: load, extend, persist.
pub struct ScoreTracker<'a> {
    source: &'a dyn SignalSource,
    calc: &'a dyn ScoreCalculator,
    store: &'a dyn StateStore<ScoreState>,
    config: TrackerConfig,
}

impl<'a> ScoreTracker<'a> {
    pub fn new(
        source: &'a dyn SignalSource,
        calc: &'a dyn ScoreCalculator,
        store: &'a dyn StateStore<ScoreState>,
        config: TrackerConfig,
    ) -> Self {
        Self { source, calc, store, config }
    }

    /// Run one backfill through `today` and persist the result.
    ///
    /// On a mid-run source failure the successfully recorded prefix is
    /// persisted before the error is returned, preserving the sequential
    /// dependency for the next attempt.
    pub async fn run(&self, today: NaiveDate) -> Result<RunSummary, TrackerError> {
        let mut state = self
            .store
            .load()?
            .unwrap_or_else(|| ScoreState::seeded(self.config.seed));
        let already_recorded = state.history.len();

        match extend(&mut state, today, self.source, self.calc, &self.config).await {
            Ok(days_recorded) => {
                self.store.save(&state)?;
                Ok(RunSummary { days_recorded, current_score: state.current_score })
            }
            Err(err) => {
                if state.history.len() > already_recorded {
                    match self.store.save(&state) {
                        Ok(()) => info!(
                            days = state.history.len() - already_recorded,
                            "persisted partial backfill before failure"
                        ),
                        Err(save_err) => {
                            warn!(error = %save_err, "failed to persist partial backfill")
                        }
                    }
                }
                Err(err)
            }
        }
    }
}
