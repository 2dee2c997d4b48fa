//! # cadence-engine — Compounding score recurrence.
//!
//! Implements the per-day multiplicative score update behind the
//! [`ScoreCalculator`](cadence_core::traits::ScoreCalculator) trait:
//! - **Boolean signals**: success multiplies the score up, failure down.
//! - **Graded signals**: the achievement ratio against a target picks
//!   full credit, a held-flat near miss, or the penalty.
//! - **No target**: a deliberate no-op so an unconfigured habit never
//!   moves its score.
//!
//! The engine is a pure function of its inputs; callers own all state.

pub mod engine;

pub use engine::{ScoreEngine, Tuning};
