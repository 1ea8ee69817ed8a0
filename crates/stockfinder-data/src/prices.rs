//! Price-series lookup by symbol.

use crate::error::{DataError, Result};
use crate::series::PriceSeries;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Source of end-of-day price series keyed by symbol.
///
/// Lookups are best-effort: an unknown symbol is `None`, never an error.
pub trait PriceLookup {
    /// End-of-day series for a symbol.
    fn eod_series(&self, symbol: &str) -> Option<PriceSeries>;
}

impl<F> PriceLookup for F
where
    F: Fn(&str) -> Option<PriceSeries>,
{
    fn eod_series(&self, symbol: &str) -> Option<PriceSeries> {
        self(symbol)
    }
}

/// Price series held in memory, typically loaded from a JSON export of the
/// historical collection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceStore {
    series: HashMap<String, PriceSeries>,
}

impl InMemoryPriceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `{symbol: {date: {close: ...}}}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a symbol's series is not
    /// an object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json)?;
        let Value::Object(symbols) = root else {
            return Err(DataError::InvalidPrices {
                symbol: "*".to_string(),
                reason: "expected an object keyed by symbol".to_string(),
            });
        };

        let mut store = Self::new();
        for (symbol, raw) in symbols {
            let series =
                PriceSeries::from_value(raw).ok_or_else(|| DataError::InvalidPrices {
                    symbol: symbol.clone(),
                    reason: "expected an object keyed by date".to_string(),
                })?;
            store.insert(symbol, series);
        }
        Ok(store)
    }

    /// Load a price file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Add or replace the series for a symbol.
    pub fn insert(&mut self, symbol: impl Into<String>, series: PriceSeries) {
        self.series.insert(symbol.into(), series);
    }

    /// Number of symbols held.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl PriceLookup for InMemoryPriceStore {
    fn eod_series(&self, symbol: &str) -> Option<PriceSeries> {
        self.series.get(symbol).cloned()
    }
}
