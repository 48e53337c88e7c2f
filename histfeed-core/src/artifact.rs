//! CSV artifact writer.
//!
//! One artifact per symbol at `{output_dir}/{output_name}.csv`, overwritten
//! on every run — each run is authoritative for its window. Writes go to a
//! `.tmp` sibling first and are renamed into place, so a failed run never
//! leaves a truncated artifact behind.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use crate::normalize::DailyRecord;

/// Canonical artifact header, in column order.
pub const CSV_HEADER: [&str; 7] = [
    "Date",
    "Open",
    "High",
    "Low",
    "Close",
    "Adj Close",
    "Volume",
];

/// Filesystem/serialization failures. Per-symbol, not fatal to the run.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("create output directory {dir}: {source}")]
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("write artifact {path}: {source}")]
    Write { path: PathBuf, source: csv::Error },

    #[error("rename artifact into place at {path}: {source}")]
    Rename {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Stats reported for a written artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactStats {
    pub rows: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub min_low: f64,
    pub max_high: f64,
}

/// Outcome of an artifact write.
#[derive(Debug)]
pub enum WriteOutcome {
    Written(ArtifactStats),
    /// Empty dataset — nothing written, no file touched.
    SkippedEmpty,
}

/// Serialize a dataset to `{output_dir}/{output_name}.csv`.
///
/// Creates the output directory if absent and overwrites any prior artifact
/// at that path. An empty dataset skips the write entirely.
pub fn write_artifact(
    output_dir: &Path,
    output_name: &str,
    records: &[DailyRecord],
) -> Result<WriteOutcome, ArtifactError> {
    let (first, last) = match (records.first(), records.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Ok(WriteOutcome::SkippedEmpty),
    };

    fs::create_dir_all(output_dir).map_err(|e| ArtifactError::CreateDir {
        dir: output_dir.to_path_buf(),
        source: e,
    })?;

    let path = output_dir.join(format!("{output_name}.csv"));
    let tmp_path = output_dir.join(format!("{output_name}.csv.tmp"));

    write_records(&tmp_path, records).map_err(|e| ArtifactError::Write {
        path: tmp_path.clone(),
        source: e,
    })?;

    fs::rename(&tmp_path, &path).map_err(|e| {
        // Leave no temp file behind on rename failure
        let _ = fs::remove_file(&tmp_path);
        ArtifactError::Rename {
            path: path.clone(),
            source: e,
        }
    })?;

    let mut min_low = f64::INFINITY;
    let mut max_high = f64::NEG_INFINITY;
    for r in records {
        min_low = min_low.min(r.low);
        max_high = max_high.max(r.high);
    }

    Ok(WriteOutcome::Written(ArtifactStats {
        rows: records.len(),
        first_date: first.date,
        last_date: last.date,
        min_low,
        max_high,
    }))
}

fn write_records(path: &Path, records: &[DailyRecord]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(CSV_HEADER)?;
    for r in records {
        writer.write_record(&[
            r.date.format("%Y-%m-%d").to_string(),
            r.open.to_string(),
            r.high.to_string(),
            r.low.to_string(),
            r.close.to_string(),
            r.adj_close.to_string(),
            r.volume.to_string(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(d: u32, low: f64, high: f64) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
            open: low + 0.5,
            high,
            low,
            close: high - 0.5,
            adj_close: high - 0.5,
            volume: 1_000,
        }
    }

    #[test]
    fn writes_exact_header() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "SPY", &[record(2, 469.0, 472.0)]).unwrap();

        let content = fs::read_to_string(dir.path().join("SPY.csv")).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(header, "Date,Open,High,Low,Close,Adj Close,Volume");
    }

    #[test]
    fn empty_dataset_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = write_artifact(dir.path(), "SPY", &[]).unwrap();

        assert!(matches!(outcome, WriteOutcome::SkippedEmpty));
        assert!(!dir.path().join("SPY.csv").exists());
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data");
        write_artifact(&nested, "SPY", &[record(2, 469.0, 472.0)]).unwrap();
        assert!(nested.join("SPY.csv").exists());
    }

    #[test]
    fn overwrites_prior_artifact() {
        let dir = tempfile::tempdir().unwrap();

        write_artifact(dir.path(), "SPY", &[record(2, 469.0, 472.0)]).unwrap();
        write_artifact(dir.path(), "SPY", &[record(3, 470.0, 473.0)]).unwrap();

        let content = fs::read_to_string(dir.path().join("SPY.csv")).unwrap();
        assert_eq!(content.lines().count(), 2); // header + one row
        assert!(content.contains("2024-01-03"));
        assert!(!content.contains("2024-01-02"));
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "SPY", &[record(2, 469.0, 472.0)]).unwrap();
        assert!(!dir.path().join("SPY.csv.tmp").exists());
    }

    #[test]
    fn stats_cover_extremes_and_span() {
        let dir = tempfile::tempdir().unwrap();
        let records = [
            record(2, 469.0, 472.0),
            record(3, 465.0, 471.0),
            record(4, 470.0, 475.5),
        ];
        let outcome = write_artifact(dir.path(), "SPY", &records).unwrap();

        let stats = match outcome {
            WriteOutcome::Written(stats) => stats,
            WriteOutcome::SkippedEmpty => panic!("expected a written artifact"),
        };
        assert_eq!(stats.rows, 3);
        assert_eq!(stats.first_date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(stats.last_date, NaiveDate::from_ymd_opt(2024, 1, 4).unwrap());
        assert_eq!(stats.min_low, 465.0);
        assert_eq!(stats.max_high, 475.5);
    }

    #[test]
    fn volume_is_integer_text() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "SPY", &[record(2, 469.0, 472.0)]).unwrap();

        let content = fs::read_to_string(dir.path().join("SPY.csv")).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert!(row.ends_with(",1000"));
    }
}
