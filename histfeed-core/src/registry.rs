//! Symbol registry — ordered mapping from provider ticker to output name.
//!
//! The output name is the stable artifact identifier and may differ from the
//! ticker where the provider quotes something under a special symbol: the
//! VIX index is quoted as `^VIX` but stored as `VIX.csv`.

use std::collections::HashSet;

use crate::config::ConfigError;

/// One registry entry: provider ticker and artifact output name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub ticker: String,
    pub output_name: String,
}

impl SymbolEntry {
    pub fn new(ticker: impl Into<String>, output_name: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            output_name: output_name.into(),
        }
    }
}

/// Ordered, validated set of symbols to fetch.
///
/// Insertion order determines processing and report order. No two entries
/// share an output name.
#[derive(Debug, Clone)]
pub struct SymbolRegistry {
    entries: Vec<SymbolEntry>,
}

impl SymbolRegistry {
    /// Build a registry, rejecting empty fields and duplicate output names.
    pub fn new(entries: Vec<SymbolEntry>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.ticker.is_empty() {
                return Err(ConfigError::EmptyField("ticker"));
            }
            if entry.output_name.is_empty() {
                return Err(ConfigError::EmptyField("output name"));
            }
            if !seen.insert(entry.output_name.as_str()) {
                return Err(ConfigError::DuplicateOutputName(entry.output_name.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The universe the feed was built around: broad equities, the VIX,
    /// long bonds, gold, and tech.
    pub fn default_universe() -> Self {
        Self {
            entries: vec![
                SymbolEntry::new("SPY", "SPY"),
                SymbolEntry::new("^VIX", "VIX"),
                SymbolEntry::new("TLT", "TLT"),
                SymbolEntry::new("GLD", "GLD"),
                SymbolEntry::new("QQQ", "QQQ"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let registry = SymbolRegistry::new(vec![
            SymbolEntry::new("QQQ", "QQQ"),
            SymbolEntry::new("^VIX", "VIX"),
            SymbolEntry::new("SPY", "SPY"),
        ])
        .unwrap();

        let names: Vec<&str> = registry
            .entries()
            .iter()
            .map(|e| e.output_name.as_str())
            .collect();
        assert_eq!(names, ["QQQ", "VIX", "SPY"]);
    }

    #[test]
    fn duplicate_output_name_rejected() {
        let err = SymbolRegistry::new(vec![
            SymbolEntry::new("SPY", "SPY"),
            SymbolEntry::new("^SPX", "SPY"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateOutputName(name) if name == "SPY"));
    }

    #[test]
    fn duplicate_tickers_with_distinct_outputs_allowed() {
        // Same provider symbol stored under two names is unusual but legal.
        let registry = SymbolRegistry::new(vec![
            SymbolEntry::new("SPY", "SPY"),
            SymbolEntry::new("SPY", "SPY_COPY"),
        ]);
        assert!(registry.is_ok());
    }

    #[test]
    fn empty_fields_rejected() {
        assert!(SymbolRegistry::new(vec![SymbolEntry::new("", "SPY")]).is_err());
        assert!(SymbolRegistry::new(vec![SymbolEntry::new("SPY", "")]).is_err());
    }

    #[test]
    fn default_universe_maps_vix_ticker() {
        let registry = SymbolRegistry::default_universe();
        assert_eq!(registry.len(), 5);

        let vix = registry
            .entries()
            .iter()
            .find(|e| e.output_name == "VIX")
            .unwrap();
        assert_eq!(vix.ticker, "^VIX");
    }
}
