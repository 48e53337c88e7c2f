//! Feed configuration — TOML file with the symbol registry and run options.
//!
//! Symbols are an array of tables so the file order becomes the registry
//! order. A missing config file falls back to compiled-in defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::registry::{SymbolEntry, SymbolRegistry};

pub const DEFAULT_OUTPUT_DIR: &str = "data";
pub const DEFAULT_LOOKBACK_DAYS: u32 = 365;

/// Configuration problems. Fatal: they surface before any fetch.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate output name '{0}' in symbol registry")]
    DuplicateOutputName(String),

    #[error("symbol entry has an empty {0}")]
    EmptyField(&'static str),

    #[error("lookback_days must be at least 1, got {0}")]
    InvalidLookback(u32),
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_output_dir")]
    output_dir: PathBuf,
    #[serde(default = "default_lookback_days")]
    lookback_days: u32,
    #[serde(default)]
    symbols: Vec<RawSymbol>,
}

#[derive(Debug, Deserialize)]
struct RawSymbol {
    ticker: String,
    /// Artifact output name; defaults to the ticker itself.
    #[serde(default)]
    output: Option<String>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_lookback_days() -> u32 {
    DEFAULT_LOOKBACK_DAYS
}

/// Validated feed configuration.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub registry: SymbolRegistry,
    pub output_dir: PathBuf,
    pub lookback_days: u32,
}

impl FeedConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        if raw.lookback_days == 0 {
            return Err(ConfigError::InvalidLookback(0));
        }

        // A config with no [[symbols]] tables means "the usual universe",
        // not "fetch nothing".
        let registry = if raw.symbols.is_empty() {
            SymbolRegistry::default_universe()
        } else {
            let entries = raw
                .symbols
                .into_iter()
                .map(|s| {
                    let output = s.output.unwrap_or_else(|| s.ticker.clone());
                    SymbolEntry {
                        ticker: s.ticker,
                        output_name: output,
                    }
                })
                .collect();
            SymbolRegistry::new(entries)?
        };

        Ok(Self {
            registry,
            output_dir: raw.output_dir,
            lookback_days: raw.lookback_days,
        })
    }

    /// Compiled-in defaults: the default universe, `./data`, one year back.
    pub fn default_universe() -> Self {
        Self {
            registry: SymbolRegistry::default_universe(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}
