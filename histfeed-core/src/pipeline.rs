//! Pipeline orchestrator — fetch, normalize, and write each registry entry.
//!
//! Per-symbol outcomes are explicit values, not an exception boundary: every
//! stage failure is recorded as `SymbolStatus::Failed` and the loop moves to
//! the next entry. The run always completes with a report for every
//! configured symbol.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::artifact::{write_artifact, ArtifactError, ArtifactStats, WriteOutcome};
use crate::normalize::{normalize, NormalizeError};
use crate::provider::{ProviderError, QuoteProvider};
use crate::registry::{SymbolEntry, SymbolRegistry};
use crate::window::FetchWindow;

/// Why a symbol failed. One variant per pipeline stage.
#[derive(Debug, Error)]
pub enum SymbolError {
    #[error(transparent)]
    Fetch(#[from] ProviderError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Write(#[from] ArtifactError),
}

/// Terminal state of one symbol's processing step.
#[derive(Debug)]
pub enum SymbolStatus {
    /// Artifact written.
    Written(ArtifactStats),
    /// Provider returned no bars for the window; nothing written.
    Empty,
    /// Processing failed; remaining symbols are unaffected.
    Failed(SymbolError),
}

/// Per-symbol outcome collected into the run summary.
#[derive(Debug)]
pub struct SymbolReport {
    pub ticker: String,
    pub output_name: String,
    pub status: SymbolStatus,
}

/// Accumulated outcome of one pipeline run. Never persisted.
#[derive(Debug)]
pub struct RunSummary {
    /// One report per registry entry, in registry order.
    pub reports: Vec<SymbolReport>,
    /// Absolute path of the output directory.
    pub output_dir: PathBuf,
}

impl RunSummary {
    pub fn written(&self) -> usize {
        self.count(|s| matches!(s, SymbolStatus::Written(_)))
    }

    pub fn empty(&self) -> usize {
        self.count(|s| matches!(s, SymbolStatus::Empty))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, SymbolStatus::Failed(_)))
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, pred: impl Fn(&SymbolStatus) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.status)).count()
    }
}

/// Progress callbacks for a pipeline run.
pub trait RunProgress {
    /// Called before a symbol's fetch begins.
    fn on_start(&self, entry: &SymbolEntry, index: usize, total: usize);

    /// Called when a symbol's processing reaches a terminal state.
    fn on_report(&self, report: &SymbolReport);

    /// Called once after every symbol has been processed.
    fn on_finish(&self, summary: &RunSummary);
}

/// Progress reporter that prints the run report to stdout.
pub struct StdoutProgress;

impl RunProgress for StdoutProgress {
    fn on_start(&self, entry: &SymbolEntry, index: usize, total: usize) {
        println!(
            "[{}/{}] Fetching {} ({})...",
            index + 1,
            total,
            entry.output_name,
            entry.ticker
        );
    }

    fn on_report(&self, report: &SymbolReport) {
        match &report.status {
            SymbolStatus::Written(stats) => println!(
                "  OK: {}: {} rows, {} to {}, price range {:.2}-{:.2}",
                report.output_name,
                stats.rows,
                stats.first_date,
                stats.last_date,
                stats.min_low,
                stats.max_high
            ),
            SymbolStatus::Empty => {
                println!("  WARN: {}: provider returned no data", report.output_name);
            }
            SymbolStatus::Failed(err) => {
                println!("  FAIL: {}: {err}", report.output_name);
            }
        }
    }

    fn on_finish(&self, summary: &RunSummary) {
        println!();
        println!(
            "Done: {} written, {} empty, {} failed ({} total)",
            summary.written(),
            summary.empty(),
            summary.failed(),
            summary.reports.len()
        );
        println!("Artifacts in: {}", summary.output_dir.display());
    }
}

/// Run the pipeline over every registry entry in order.
///
/// Symbols are processed strictly sequentially. A failed symbol never
/// prevents the remaining symbols from being fetched and written.
pub fn run_pipeline(
    registry: &SymbolRegistry,
    window: FetchWindow,
    provider: &dyn QuoteProvider,
    output_dir: &Path,
    progress: &dyn RunProgress,
) -> RunSummary {
    let total = registry.len();
    let mut reports = Vec::with_capacity(total);

    for (i, entry) in registry.entries().iter().enumerate() {
        progress.on_start(entry, i, total);

        let report = SymbolReport {
            ticker: entry.ticker.clone(),
            output_name: entry.output_name.clone(),
            status: process_symbol(entry, window, provider, output_dir),
        };
        progress.on_report(&report);
        reports.push(report);
    }

    let summary = RunSummary {
        reports,
        output_dir: absolute(output_dir),
    };
    progress.on_finish(&summary);
    summary
}

/// Fetch → normalize → write for one symbol.
fn process_symbol(
    entry: &SymbolEntry,
    window: FetchWindow,
    provider: &dyn QuoteProvider,
    output_dir: &Path,
) -> SymbolStatus {
    match try_symbol(entry, window, provider, output_dir) {
        Ok(WriteOutcome::Written(stats)) => SymbolStatus::Written(stats),
        Ok(WriteOutcome::SkippedEmpty) => SymbolStatus::Empty,
        Err(err) => SymbolStatus::Failed(err),
    }
}

fn try_symbol(
    entry: &SymbolEntry,
    window: FetchWindow,
    provider: &dyn QuoteProvider,
    output_dir: &Path,
) -> Result<WriteOutcome, SymbolError> {
    let raw = provider.fetch(&entry.ticker, window)?;
    let records = normalize(raw)?;
    Ok(write_artifact(output_dir, &entry.output_name, &records)?)
}

/// Best-effort absolute form of the output directory for reporting.
fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}
