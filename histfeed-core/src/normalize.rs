//! Schema normalization — raw provider bars to canonical daily records.

use chrono::NaiveDate;
use thiserror::Error;

use crate::provider::RawBar;

/// Canonical daily record, one per trading day.
///
/// `adj_close` mirrors `close`; the column exists only for schema
/// compatibility with consumers expecting an adjusted-close series. No
/// split/dividend adjustment is computed.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: u64,
}

/// Ordered sequence of canonical records for one symbol. May be empty.
pub type Dataset = Vec<DailyRecord>;

/// A malformed bar fails the symbol, not the run.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("bar for {date} has a non-finite {field}")]
    BadValue { date: NaiveDate, field: &'static str },
}

/// Normalize raw bars into canonical records.
///
/// Sorts by date ascending (provider order is not relied upon), keeps the
/// first bar per date, derives `adj_close = close`, and rejects bars with
/// non-finite OHLC values. Deterministic and idempotent.
pub fn normalize(mut raw: Vec<RawBar>) -> Result<Dataset, NormalizeError> {
    raw.sort_by_key(|bar| bar.date);

    let mut records: Dataset = Vec::with_capacity(raw.len());
    for bar in raw {
        if records.last().map(|r| r.date) == Some(bar.date) {
            continue;
        }

        for (field, value) in [
            ("open", bar.open),
            ("high", bar.high),
            ("low", bar.low),
            ("close", bar.close),
        ] {
            if !value.is_finite() {
                return Err(NormalizeError::BadValue {
                    date: bar.date,
                    field,
                });
            }
        }

        records.push(DailyRecord {
            date: bar.date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            adj_close: bar.close,
            volume: bar.volume,
        });
    }

    Ok(records)
}
