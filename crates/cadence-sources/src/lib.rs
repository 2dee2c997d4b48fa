//! # cadence-sources — Network signal clients.
//!
//! Thin clients behind the core trait seams:
//! - [`GithubCommitSource`] answers "was there a commit on day D?" via the
//!   GitHub commit-listing API.
//! - [`SheetHabitLog`] bulk-reads the habit spreadsheet and parses rows
//!   into [`HabitRow`](cadence_core::types::HabitRow)s.
//!
//! A transport or auth failure is always surfaced as an error, never as
//! an empty signal — see the error policy on the core traits.

pub mod github;
pub mod sheets;

pub use github::GithubCommitSource;
pub use sheets::SheetHabitLog;
