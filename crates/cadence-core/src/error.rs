//! Error types for the Cadence tracker.
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("http: {0}")] Http(String),
    #[error("{provider} returned status {status}")] Status { provider: &'static str, status: u16 },
    #[error("malformed response from {provider}: {detail}")] Malformed { provider: &'static str, detail: String },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io at {path}: {source}")] Io { path: String, source: std::io::Error },
    #[error("malformed state file {path}: {detail}")] Malformed { path: String, detail: String },
}

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("today {today} precedes tracker epoch {epoch}")] TodayBeforeEpoch { today: NaiveDate, epoch: NaiveDate },
    #[error("signal source failed on {day}")] Signal { day: NaiveDate, source: SourceError },
    #[error("habit log read failed")] HabitLog { source: SourceError },
    #[error(transparent)] Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_error_names_the_day() {
        let err = TrackerError::Signal {
            day: NaiveDate::from_ymd_opt(2025, 5, 17).unwrap(),
            source: SourceError::Status { provider: "github", status: 502 },
        };
        assert_eq!(err.to_string(), "signal source failed on 2025-05-17");
        let inner = std::error::Error::source(&err).unwrap();
        assert_eq!(inner.to_string(), "github returned status 502");
    }

    #[test]
    fn epoch_error_is_loud_about_both_dates() {
        let err = TrackerError::TodayBeforeEpoch {
            today: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            epoch: NaiveDate::from_ymd_opt(2025, 5, 15).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "today 2025-05-01 precedes tracker epoch 2025-05-15"
        );
    }

    #[test]
    fn store_error_wraps_transparently() {
        let err: TrackerError = StoreError::Malformed {
            path: "progress.json".into(),
            detail: "missing field".into(),
        }
        .into();
        assert!(err.to_string().contains("progress.json"));
    }
}
