//! Score engine implementing the [`ScoreCalculator`] trait.
//!
//! Multiplier selection for boolean and graded daily signals. The graded
//! path divides value by target, so every threshold comparison happens on
//! the achievement ratio, not on raw values.

use cadence_core::constants::{
    DEFAULT_FAILURE_MULT, DEFAULT_NEAR_MISS_RATIO, DEFAULT_SUCCESS_MULT,
};
use cadence_core::traits::ScoreCalculator;
use cadence_core::types::Signal;

/// Recurrence tuning for one tracker instance.
///
/// Threaded in at construction so the single-signal and multi-habit
/// trackers can run with independent settings in the same process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Multiplier for a met target or an occurred event.
    pub success_mult: f64,
    /// Multiplier for a clear miss.
    pub failure_mult: f64,
    /// Achievement ratio at or above which a miss is held flat.
    pub near_miss_ratio: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            success_mult: DEFAULT_SUCCESS_MULT,
            failure_mult: DEFAULT_FAILURE_MULT,
            near_miss_ratio: DEFAULT_NEAR_MISS_RATIO,
        }
    }
}

/// The production score calculator.
///
/// Implements [`ScoreCalculator`] with:
/// - boolean signals mapped straight to the success/failure multipliers
/// - graded signals banded by achievement ratio (full credit / held flat /
///   penalty)
/// - identity for signals with no usable target
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    tuning: Tuning,
}

impl ScoreEngine {
    /// Create an engine with the given tuning.
    pub fn new(tuning: Tuning) -> Self {
        Self { tuning }
    }

    /// The tuning this engine was built with.
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}

impl ScoreCalculator for ScoreEngine {
    fn multiplier(&self, signal: &Signal) -> f64 {
        match *signal {
            Signal::Occurred(true) => self.tuning.success_mult,
            Signal::Occurred(false) => self.tuning.failure_mult,
            Signal::Graded { value, target } => {
                // No target (or a degenerate one) means "not configured":
                // hold the score rather than guessing a penalty.
                let Some(target) = target.filter(|t| *t > 0.0) else {
                    return 1.0;
                };
                let ratio = value / target;
                if ratio >= 1.0 {
                    self.tuning.success_mult
                } else if ratio >= self.tuning.near_miss_ratio {
                    1.0
                } else {
                    self.tuning.failure_mult
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn engine() -> ScoreEngine {
        ScoreEngine::default()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    // --- boolean signals ---

    #[test]
    fn occurred_applies_success_multiplier() {
        let e = engine();
        assert_eq!(e.next(1.0, &Signal::Occurred(true)), 1.01);
    }

    #[test]
    fn missed_applies_failure_multiplier() {
        let e = engine();
        assert_eq!(e.next(1.0, &Signal::Occurred(false)), 0.99);
    }

    #[test]
    fn three_day_compounding_example() {
        let e = engine();
        let day1 = e.next(1.0, &Signal::Occurred(true));
        let day2 = e.next(day1, &Signal::Occurred(false));
        let day3 = e.next(day2, &Signal::Occurred(true));
        assert!(approx(day1, 1.01), "day1 = {day1}");
        assert!(approx(day2, 0.9999), "day2 = {day2}");
        assert!(approx(day3, 1.009899), "day3 = {day3}");
    }

    // --- graded signals ---

    #[test]
    fn target_met_gets_full_credit() {
        let e = engine();
        let next = e.next(1.0, &Signal::Graded { value: 15.0, target: Some(15.0) });
        assert_eq!(next, 1.01);
    }

    #[test]
    fn target_exceeded_gets_full_credit() {
        let e = engine();
        let next = e.next(1.0, &Signal::Graded { value: 30.0, target: Some(15.0) });
        assert_eq!(next, 1.01);
    }

    #[test]
    fn near_miss_holds_score_flat() {
        let e = engine();
        // 12/15 = 0.8, exactly on the near-miss floor.
        let next = e.next(1.23, &Signal::Graded { value: 12.0, target: Some(15.0) });
        assert_eq!(next, 1.23);
    }

    #[test]
    fn near_miss_band_upper_edge_is_flat() {
        let e = engine();
        let next = e.next(1.0, &Signal::Graded { value: 14.9, target: Some(15.0) });
        assert_eq!(next, 1.0);
    }

    #[test]
    fn clear_miss_is_penalized() {
        let e = engine();
        // 10/20 = 0.5, below the near-miss floor.
        let next = e.next(1.0, &Signal::Graded { value: 10.0, target: Some(20.0) });
        assert_eq!(next, 0.99);
        assert!(next < 1.0);
    }

    #[test]
    fn missing_target_is_identity() {
        let e = engine();
        let next = e.next(1.37, &Signal::Graded { value: 10.0, target: None });
        assert_eq!(next, 1.37);
    }

    #[test]
    fn zero_target_is_identity() {
        let e = engine();
        let next = e.next(1.37, &Signal::Graded { value: 10.0, target: Some(0.0) });
        assert_eq!(next, 1.37);
    }

    #[test]
    fn negative_target_is_identity() {
        let e = engine();
        let next = e.next(1.37, &Signal::Graded { value: 10.0, target: Some(-5.0) });
        assert_eq!(next, 1.37);
    }

    #[test]
    fn zero_value_against_target_is_penalized() {
        let e = engine();
        let next = e.next(1.0, &Signal::Graded { value: 0.0, target: Some(15.0) });
        assert_eq!(next, 0.99);
    }

    // --- tuning ---

    #[test]
    fn custom_tuning_is_respected() {
        let e = ScoreEngine::new(Tuning {
            success_mult: 1.05,
            failure_mult: 0.9,
            near_miss_ratio: 0.5,
        });
        assert_eq!(e.tuning().success_mult, 1.05);
        assert_eq!(e.multiplier(&Signal::Occurred(true)), 1.05);
        assert_eq!(e.multiplier(&Signal::Occurred(false)), 0.9);
        // 0.6 clears the lowered near-miss floor.
        let held = e.multiplier(&Signal::Graded { value: 6.0, target: Some(10.0) });
        assert_eq!(held, 1.0);
    }

    #[test]
    fn default_tuning_matches_constants() {
        let t = Tuning::default();
        assert_eq!(t.success_mult, 1.01);
        assert_eq!(t.failure_mult, 0.99);
        assert_eq!(t.near_miss_ratio, 0.8);
    }

    // --- dyn compatibility ---

    #[test]
    fn engine_is_object_safe() {
        let e = engine();
        let dyn_e: &dyn ScoreCalculator = &e;
        assert_eq!(dyn_e.multiplier(&Signal::Occurred(true)), 1.01);
    }

    // --- proptest ---

    proptest! {
        #[test]
        fn multiplier_is_one_of_the_three(
            value in 0.0f64..1000.0,
            target in proptest::option::of(0.0f64..1000.0),
            occurred in any::<bool>(),
        ) {
            let e = engine();
            for signal in [Signal::Occurred(occurred), Signal::Graded { value, target }] {
                let m = e.multiplier(&signal);
                prop_assert!(
                    m == 1.01 || m == 1.0 || m == 0.99,
                    "unexpected multiplier {m} for {signal:?}"
                );
            }
        }

        #[test]
        fn scores_stay_positive(
            signals in proptest::collection::vec(any::<bool>(), 0..2000),
        ) {
            let e = engine();
            let mut score = 1.0f64;
            for occurred in signals {
                score = e.next(score, &Signal::Occurred(occurred));
                prop_assert!(score > 0.0, "score went non-positive: {score}");
            }
        }

        #[test]
        fn fold_is_bounded_by_pure_streaks(
            signals in proptest::collection::vec(any::<bool>(), 1..500),
        ) {
            let e = engine();
            let n = signals.len() as i32;
            let mut score = 1.0f64;
            for occurred in &signals {
                score = e.next(score, &Signal::Occurred(*occurred));
            }
            let all_up = 1.01f64.powi(n);
            let all_down = 0.99f64.powi(n);
            prop_assert!(score <= all_up * (1.0 + 1e-9));
            prop_assert!(score >= all_down * (1.0 - 1e-9));
        }

        #[test]
        fn graded_never_beats_success_multiplier(
            value in 0.0f64..1000.0,
            target in 0.1f64..1000.0,
        ) {
            let e = engine();
            let m = e.multiplier(&Signal::Graded { value, target: Some(target) });
            prop_assert!(m <= 1.01);
            prop_assert!(m >= 0.99);
        }

        #[test]
        fn ratio_banding_is_monotone(
            target in 1.0f64..100.0,
            lo in 0.0f64..1.0,
            hi in 0.0f64..1.0,
        ) {
            // A higher achieved fraction never earns a lower multiplier.
            let e = engine();
            let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
            let m_lo = e.multiplier(&Signal::Graded { value: lo * target, target: Some(target) });
            let m_hi = e.multiplier(&Signal::Graded { value: hi * target, target: Some(target) });
            prop_assert!(m_lo <= m_hi, "banding not monotone: {m_lo} > {m_hi}");
        }
    }
}
