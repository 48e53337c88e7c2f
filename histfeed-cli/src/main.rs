//! histfeed CLI — fetch daily-bar artifacts and inspect prior runs.
//!
//! Commands:
//! - `fetch` — download daily bars for the configured symbols and write one
//!   CSV artifact per symbol
//! - `status` — report existing artifacts: row counts, date ranges, sizes

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use histfeed_core::{run_pipeline, FeedConfig, FetchWindow, StdoutProgress, YahooProvider};

#[derive(Parser)]
#[command(
    name = "histfeed",
    about = "histfeed — daily-bar CSV feed for the model trainer"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch daily bars for the configured symbols and write CSV artifacts.
    Fetch {
        /// TOML config file with the symbol registry. Compiled-in defaults
        /// (SPY, ^VIX, TLT, GLD, QQQ) when absent.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the output directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Override the lookback window in days.
        #[arg(long)]
        lookback_days: Option<u32>,
    },
    /// Report existing artifacts: row counts, date ranges, sizes.
    Status {
        /// Output directory to inspect.
        #[arg(long, default_value = "data")]
        output_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            config,
            output_dir,
            lookback_days,
        } => run_fetch(config, output_dir, lookback_days),
        Commands::Status { output_dir } => run_status(&output_dir),
    }
}

fn run_fetch(
    config_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    lookback_days: Option<u32>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => FeedConfig::from_file(&path)?,
        None => FeedConfig::default_universe(),
    };
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    if let Some(days) = lookback_days {
        config.lookback_days = days;
    }

    let today = chrono::Local::now().date_naive();
    let window = FetchWindow::trailing(today, config.lookback_days)?;

    println!(
        "Fetching {} to {} for {} symbol(s)",
        window.start,
        window.end,
        config.registry.len()
    );
    println!();

    let provider = YahooProvider::new();
    let summary = run_pipeline(
        &config.registry,
        window,
        &provider,
        &config.output_dir,
        &StdoutProgress,
    );

    if !summary.all_succeeded() {
        std::process::exit(1);
    }

    Ok(())
}

fn run_status(output_dir: &Path) -> Result<()> {
    if !output_dir.exists() {
        println!("Output directory does not exist: {}", output_dir.display());
        return Ok(());
    }

    let mut rows: Vec<(String, String, usize, u64)> = Vec::new();
    let mut total_size: u64 = 0;

    for entry in std::fs::read_dir(output_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let size = entry.metadata()?.len();
        total_size += size;

        let (range, count) = artifact_summary(&path);
        rows.push((name, range, count, size));
    }

    if rows.is_empty() {
        println!("No artifacts in: {}", output_dir.display());
        return Ok(());
    }

    rows.sort_by(|a, b| a.0.cmp(&b.0));

    println!("Artifacts: {}", output_dir.display());
    println!("Symbols: {}", rows.len());
    println!("Total size: {}", format_size(total_size));
    println!();
    println!(
        "{:<8} {:<25} {:<8} {:>10}",
        "Symbol", "Date Range", "Rows", "Size"
    );
    println!("{}", "-".repeat(54));
    for (name, range, count, size) in &rows {
        println!(
            "{:<8} {:<25} {:<8} {:>10}",
            name,
            range,
            count,
            format_size(*size)
        );
    }

    Ok(())
}

/// Date range and row count of one artifact; `(unreadable)` when the file
/// cannot be parsed as CSV.
fn artifact_summary(path: &Path) -> (String, usize) {
    let mut reader = match csv::Reader::from_path(path) {
        Ok(reader) => reader,
        Err(_) => return ("(unreadable)".into(), 0),
    };

    let mut first: Option<String> = None;
    let mut last: Option<String> = None;
    let mut count = 0;

    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(_) => return ("(unreadable)".into(), count),
        };
        let date = record.get(0).unwrap_or("").to_string();
        if first.is_none() {
            first = Some(date.clone());
        }
        last = Some(date);
        count += 1;
    }

    match (first, last) {
        (Some(first), Some(last)) => (format!("{first} to {last}"), count),
        _ => ("(empty)".into(), 0),
    }
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
