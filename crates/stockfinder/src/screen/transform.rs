//! Flattening screened records for display.

use super::{ScreenedRecord, Screener};
use crate::criteria::Criteria;
use serde_json::Value;
use stockfinder_data::mapping::fields;
use stockfinder_growth::{SharePriceGrowth, format_percentage};
use stockfinder_output::TransformedRecord;

impl Screener {
    /// Flatten one record into its display form.
    ///
    /// Missing paths become `null`; growth decimals become `"12.3%"` strings;
    /// share price growth uses the criteria's share price window.
    pub fn transform(&self, record: &ScreenedRecord, criteria: &Criteria) -> TransformedRecord {
        let field = |logical: &str| {
            self.mapping
                .lookup(&record.document, logical)
                .cloned()
                .unwrap_or(Value::Null)
        };
        let price = record
            .prices
            .as_ref()
            .map(|series| SharePriceGrowth::from_series(series, criteria.share_price_window()))
            .unwrap_or_default();

        TransformedRecord {
            name: field(fields::NAME),
            code: field(fields::CODE),
            exchange: field(fields::EXCHANGE),
            country: field(fields::COUNTRY),
            revenue: field(fields::REVENUE),
            return_on_equity: field(fields::RETURN_ON_EQUITY),
            currency_symbol: field(fields::CURRENCY_SYMBOL),
            identifier: field(fields::IDENTIFIER),
            revenue_growth: format_percentage(record.revenue_growth),
            earnings_growth: format_percentage(record.earnings_growth),
            share_price_recent: price.recent_price,
            share_price_recent_date: price.recent_date,
            share_price_oldest: price.oldest_price,
            share_price_oldest_date: price.oldest_date,
            share_price_growth: price.growth_pct,
            share_price_cagr: price.cagr_pct,
        }
    }

    /// Flatten a batch, preserving order.
    pub fn transform_all(
        &self,
        records: &[ScreenedRecord],
        criteria: &Criteria,
    ) -> Vec<TransformedRecord> {
        records
            .iter()
            .map(|record| self.transform(record, criteria))
            .collect()
    }
}
