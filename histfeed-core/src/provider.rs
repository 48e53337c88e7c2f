//! Quote provider trait and structured error types.
//!
//! The QuoteProvider trait abstracts over the historical-quote source so a
//! deterministic stub can stand in for Yahoo Finance in tests. The fetch
//! call is the pipeline's only I/O boundary besides the artifact write.

use chrono::NaiveDate;
use thiserror::Error;

use crate::window::FetchWindow;

/// Raw daily OHLCV bar as returned by a provider, before normalization.
///
/// Providers fill missing numeric values with NaN; the normalizer rejects
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Fetch failures, each carrying the ticker it failed for.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network unreachable fetching '{ticker}': {reason}")]
    NetworkUnreachable { ticker: String, reason: String },

    #[error("symbol not found: {ticker}")]
    SymbolNotFound { ticker: String },

    #[error("response format changed for '{ticker}': {reason}")]
    ResponseFormatChanged { ticker: String, reason: String },

    #[error("provider returned HTTP {status} for '{ticker}'")]
    UpstreamStatus { ticker: String, status: u16 },
}

/// Trait for historical daily-bar providers.
///
/// A response with zero bars is a valid empty result, not an error.
/// Implementations make exactly one attempt per call; retry policy, if any,
/// belongs to the caller.
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily OHLCV bars for a ticker over the window.
    fn fetch(&self, ticker: &str, window: FetchWindow) -> Result<Vec<RawBar>, ProviderError>;
}
