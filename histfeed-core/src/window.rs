//! Fetch window — the trailing date range requested from the provider.

use chrono::{Duration, NaiveDate};

use crate::config::ConfigError;

/// Absolute `[start, end]` date range for a fetch.
///
/// Computed once per run; `start` is always strictly before `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FetchWindow {
    /// Compute a trailing window ending at `end` and spanning `lookback_days`.
    ///
    /// `end - start` is exactly `lookback_days` days. A zero lookback is a
    /// configuration error.
    pub fn trailing(end: NaiveDate, lookback_days: u32) -> Result<Self, ConfigError> {
        if lookback_days == 0 {
            return Err(ConfigError::InvalidLookback(lookback_days));
        }
        Ok(Self {
            start: end - Duration::days(i64::from(lookback_days)),
            end,
        })
    }

    /// Window length in days.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn trailing_spans_exact_day_count() {
        let w = FetchWindow::trailing(date(2024, 6, 15), 365).unwrap();
        assert_eq!(w.end, date(2024, 6, 15));
        assert_eq!(w.days(), 365);
    }

    #[test]
    fn trailing_crosses_year_boundary() {
        let w = FetchWindow::trailing(date(2024, 1, 10), 30).unwrap();
        assert_eq!(w.start, date(2023, 12, 11));
    }

    #[test]
    fn zero_lookback_is_a_config_error() {
        let err = FetchWindow::trailing(date(2024, 6, 15), 0).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLookback(0)));
    }

    #[test]
    fn start_is_before_end() {
        let w = FetchWindow::trailing(date(2024, 6, 15), 1).unwrap();
        assert!(w.start < w.end);
    }
}
