//! Growth-based inclusion.

use super::{ScreenedRecord, Screener};
use crate::criteria::{Criteria, GrowthCriteria};
use serde_json::Value;
use stockfinder_data::{FinancialSeries, mapping::fields};
use stockfinder_growth::{EARNINGS_FIELD, REVENUE_FIELD, calculate_growth};
use tracing::debug;

/// One growth criterion bound to the statement field it measures.
#[derive(Debug, Clone, Copy)]
struct GrowthRule {
    field: &'static str,
    years: Option<u32>,
    min: Option<f64>,
}

enum Outcome {
    Keep(Option<f64>),
    Exclude(Option<f64>),
}

impl GrowthRule {
    fn new(field: &'static str, criteria: &GrowthCriteria) -> Self {
        Self {
            field,
            years: criteria.years,
            min: criteria.min_decimal(),
        }
    }

    /// Growth is only computed when a lookback is given; a minimum without
    /// a lookback is ignored.
    fn evaluate(&self, financials: Option<&FinancialSeries<'_>>) -> Outcome {
        let Some(years) = self.years else {
            return Outcome::Keep(None);
        };
        let growth = financials.and_then(|series| calculate_growth(series, self.field, years));
        match (self.min, growth) {
            (Some(_), None) => Outcome::Exclude(None),
            (Some(min), Some(g)) if g < min => Outcome::Exclude(Some(g)),
            _ => Outcome::Keep(growth),
        }
    }
}

impl Screener {
    /// Annotate documents with revenue and earnings growth and drop those
    /// below the requested minimums.
    ///
    /// Growth is attached whenever a lookback is requested, even without a
    /// minimum. A document whose growth cannot be computed is excluded only
    /// when a minimum applies to it.
    pub fn filter_and_grow(
        &self,
        documents: Vec<Value>,
        criteria: &Criteria,
    ) -> Vec<ScreenedRecord> {
        let revenue = GrowthRule::new(REVENUE_FIELD, &criteria.revenue_growth);
        let earnings = GrowthRule::new(EARNINGS_FIELD, &criteria.earnings_growth);

        documents
            .into_iter()
            .filter_map(|doc| self.grow(doc, &revenue, &earnings))
            .collect()
    }

    fn grow(
        &self,
        document: Value,
        revenue: &GrowthRule,
        earnings: &GrowthRule,
    ) -> Option<ScreenedRecord> {
        let financials = self
            .mapping
            .lookup(&document, fields::FINANCIALS)
            .and_then(FinancialSeries::from_value);

        let mut grown = [None, None];
        for (slot, rule) in grown.iter_mut().zip([revenue, earnings]) {
            match rule.evaluate(financials.as_ref()) {
                Outcome::Keep(growth) => *slot = growth,
                Outcome::Exclude(growth) => {
                    debug!(
                        code = ?self.mapping.lookup(&document, fields::CODE),
                        field = rule.field,
                        ?growth,
                        min = ?rule.min,
                        "Excluded by growth criteria"
                    );
                    return None;
                }
            }
        }
        let [revenue_growth, earnings_growth] = grown;

        Some(ScreenedRecord {
            revenue_growth,
            earnings_growth,
            ..ScreenedRecord::new(document)
        })
    }
}
