//! histfeed core — symbol registry, fetch window, quote provider, schema
//! normalizer, CSV artifact writer, and the pipeline orchestrator.
//!
//! The pipeline's central property is fault isolation: a failure while
//! processing one symbol is recorded in the run summary and never prevents
//! the remaining symbols from being processed. Only configuration errors
//! abort a run, and they surface before any fetch.

pub mod artifact;
pub mod config;
pub mod normalize;
pub mod pipeline;
pub mod provider;
pub mod registry;
pub mod window;
pub mod yahoo;

pub use artifact::{write_artifact, ArtifactError, ArtifactStats, WriteOutcome, CSV_HEADER};
pub use config::{ConfigError, FeedConfig};
pub use normalize::{normalize, DailyRecord, Dataset, NormalizeError};
pub use pipeline::{
    run_pipeline, RunProgress, RunSummary, StdoutProgress, SymbolError, SymbolReport, SymbolStatus,
};
pub use provider::{ProviderError, QuoteProvider, RawBar};
pub use registry::{SymbolEntry, SymbolRegistry};
pub use window::FetchWindow;
pub use yahoo::YahooProvider;
