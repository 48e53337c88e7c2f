//! Yahoo Finance quote provider.
//!
//! Fetches daily OHLCV bars from Yahoo's v8 chart API with a single blocking
//! request per symbol. Yahoo Finance has no official API and is subject to
//! unannounced format changes, so response parsing is defensive about
//! missing sections.

use std::time::Duration;

use serde::Deserialize;

use crate::provider::{ProviderError, QuoteProvider, RawBar};
use crate::window::FetchWindow;

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
}

impl YahooProvider {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    /// Build the chart API URL for a ticker and window.
    fn chart_url(ticker: &str, window: FetchWindow) -> String {
        let start_ts = window.start.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();
        let end_ts = window.end.and_hms_opt(23, 59, 59).unwrap().and_utc().timestamp();
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{ticker}\
             ?period1={start_ts}&period2={end_ts}&interval=1d"
        )
    }

    /// Parse the chart API response into raw bars.
    ///
    /// A response with no timestamps is an empty result, not an error —
    /// Yahoo omits the timestamp array when a window holds no trading days.
    fn parse_response(ticker: &str, resp: ChartResponse) -> Result<Vec<RawBar>, ProviderError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    ProviderError::SymbolNotFound {
                        ticker: ticker.to_string(),
                    }
                } else {
                    ProviderError::ResponseFormatChanged {
                        ticker: ticker.to_string(),
                        reason: format!("{}: {}", err.code, err.description),
                    }
                }
            } else {
                ProviderError::ResponseFormatChanged {
                    ticker: ticker.to_string(),
                    reason: "empty result with no error".into(),
                }
            }
        })?;

        let data = result.into_iter().next().ok_or_else(|| {
            ProviderError::ResponseFormatChanged {
                ticker: ticker.to_string(),
                reason: "result array is empty".into(),
            }
        })?;

        let timestamps = match data.timestamp {
            Some(ts) => ts,
            None => return Ok(Vec::new()),
        };

        let quote = data.indicators.quote.into_iter().next().ok_or_else(|| {
            ProviderError::ResponseFormatChanged {
                ticker: ticker.to_string(),
                reason: "no quote data".into(),
            }
        })?;

        let mut bars = Vec::with_capacity(timestamps.len());

        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| ProviderError::ResponseFormatChanged {
                    ticker: ticker.to_string(),
                    reason: format!("invalid timestamp: {ts}"),
                })?;

            let open = quote.open.get(i).copied().flatten();
            let high = quote.high.get(i).copied().flatten();
            let low = quote.low.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();
            let volume = quote.volume.get(i).copied().flatten();

            // Skip bars where all OHLCV are None (holidays/non-trading days)
            if open.is_none()
                && high.is_none()
                && low.is_none()
                && close.is_none()
                && volume.is_none()
            {
                continue;
            }

            bars.push(RawBar {
                date,
                open: open.unwrap_or(f64::NAN),
                high: high.unwrap_or(f64::NAN),
                low: low.unwrap_or(f64::NAN),
                close: close.unwrap_or(f64::NAN),
                volume: volume.unwrap_or(0),
            });
        }

        Ok(bars)
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(&self, ticker: &str, window: FetchWindow) -> Result<Vec<RawBar>, ProviderError> {
        let url = Self::chart_url(ticker, window);

        let resp = self.client.get(&url).send().map_err(|e| {
            ProviderError::NetworkUnreachable {
                ticker: ticker.to_string(),
                reason: e.to_string(),
            }
        })?;

        let status = resp.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            // Yahoo reports unknown symbols as a 404 with a JSON error body.
            return match resp.json::<ChartResponse>() {
                Ok(chart) => Self::parse_response(ticker, chart),
                Err(_) => Err(ProviderError::SymbolNotFound {
                    ticker: ticker.to_string(),
                }),
            };
        }

        if !status.is_success() {
            return Err(ProviderError::UpstreamStatus {
                ticker: ticker.to_string(),
                status: status.as_u16(),
            });
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            ProviderError::ResponseFormatChanged {
                ticker: ticker.to_string(),
                reason: format!("failed to parse response: {e}"),
            }
        })?;

        Self::parse_response(ticker, chart)
    }
}
