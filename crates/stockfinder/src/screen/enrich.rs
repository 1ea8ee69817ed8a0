//! Best-effort join of end-of-day price series.

use super::{ScreenedRecord, Screener};
use serde_json::Value;
use stockfinder_data::{PriceLookup, PriceSeries, mapping::fields};
use tracing::debug;

impl Screener {
    /// Attach an end-of-day series to each record that has one.
    ///
    /// Records without a match come back with no price data.
    pub fn enrich<L>(&self, records: Vec<ScreenedRecord>, prices: &L) -> Vec<ScreenedRecord>
    where
        L: PriceLookup + ?Sized,
    {
        records
            .into_iter()
            .map(|mut record| {
                record.prices = self.find_prices(&record.document, prices);
                if record.prices.is_none() {
                    debug!(
                        code = ?self.mapping.lookup(&record.document, fields::CODE),
                        "No price history found"
                    );
                }
                record
            })
            .collect()
    }

    /// Candidate price-series symbols for a document, in lookup order: the
    /// identifier doubled (`"{id}.{id}"`), then the primary ticker.
    pub fn price_symbols(&self, document: &Value) -> Vec<String> {
        let identifier = self
            .mapping
            .lookup(document, fields::IDENTIFIER)
            .and_then(symbol_text)
            .map(|id| format!("{id}.{id}"));
        let primary = self
            .mapping
            .lookup(document, fields::PRIMARY_TICKER)
            .and_then(symbol_text);

        identifier.into_iter().chain(primary).collect()
    }

    fn find_prices<L>(&self, document: &Value, prices: &L) -> Option<PriceSeries>
    where
        L: PriceLookup + ?Sized,
    {
        self.price_symbols(document)
            .iter()
            .find_map(|symbol| prices.eod_series(symbol))
    }
}

fn symbol_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
