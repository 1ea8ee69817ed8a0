//! Screening pipeline.
//!
//! ```text
//! documents -> query -> filter_and_grow -> enrich -> transform -> response
//! ```
//!
//! Each stage works record by record with no shared mutable state. The only
//! shared input is the read-only [`FieldMapping`].

mod enrich;
mod filter;
mod transform;

use crate::criteria::Criteria;
use crate::error::Result;
use crate::query::Query;
use serde_json::Value;
use std::sync::Arc;
use stockfinder_data::{FieldMapping, PriceLookup, PriceSeries};
use stockfinder_output::SearchResponse;
use tracing::debug;

/// A document that passed screening, with its computed annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenedRecord {
    /// Source document.
    pub document: Value,
    /// Revenue CAGR as a decimal, when requested and computable.
    pub revenue_growth: Option<f64>,
    /// EBIT CAGR as a decimal, when requested and computable.
    pub earnings_growth: Option<f64>,
    /// End-of-day prices attached by enrichment.
    pub prices: Option<PriceSeries>,
}

impl ScreenedRecord {
    /// Wrap a document with no annotations.
    pub const fn new(document: Value) -> Self {
        Self {
            document,
            revenue_growth: None,
            earnings_growth: None,
            prices: None,
        }
    }
}

/// Applies criteria to fundamentals documents.
#[derive(Debug, Clone)]
pub struct Screener {
    mapping: Arc<FieldMapping>,
}

impl Screener {
    /// Create a screener over a shared field mapping.
    pub const fn new(mapping: Arc<FieldMapping>) -> Self {
        Self { mapping }
    }

    /// Field mapping in use.
    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    /// Build the store query for a set of criteria.
    ///
    /// # Errors
    ///
    /// See [`Query::from_criteria`].
    pub fn build_query(&self, criteria: &Criteria) -> Result<Query> {
        Query::from_criteria(criteria, &self.mapping)
    }

    /// Run the whole pipeline over documents held in memory.
    ///
    /// Criteria are validated before any document is read. Documents failing
    /// the revenue/ROE query or the growth criteria are dropped; the rest keep
    /// their input order.
    ///
    /// # Errors
    ///
    /// Returns an error only for invalid criteria or an unusable mapping.
    pub fn search(
        &self,
        documents: Vec<Value>,
        criteria: &Criteria,
        prices: Option<&dyn PriceLookup>,
    ) -> Result<SearchResponse> {
        let query = self.build_query(criteria)?;

        let total = documents.len();
        let candidates: Vec<Value> = documents
            .into_iter()
            .filter(|doc| query.matches(doc))
            .collect();
        debug!(
            total,
            bounds = query.bounds().len(),
            matched = candidates.len(),
            "Applied initial query"
        );

        let mut screened = self.filter_and_grow(candidates, criteria);
        if let Some(prices) = prices {
            screened = self.enrich(screened, prices);
        }

        Ok(SearchResponse::new(self.transform_all(&screened, criteria)))
    }
}
