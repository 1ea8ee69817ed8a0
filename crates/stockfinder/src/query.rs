//! Initial document query built from criteria.
//!
//! The revenue range and ROE floor are plain field bounds, so they are pushed
//! down to the document store as a filter document. [`Query::matches`]
//! applies the same predicate in memory for callers that already hold the
//! documents.

use crate::criteria::Criteria;
use crate::error::Result;
use serde_json::{Map, Value, json};
use stockfinder_data::{FieldMapping, get_nested_value, mapping::fields, parse_number};

/// Inclusive numeric bound on one document path.
#[derive(Debug, Clone, PartialEq)]
pub struct Bound {
    /// Dot-separated document path.
    pub path: String,
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: Option<f64>,
}

impl Bound {
    fn matches(&self, doc: &Value) -> bool {
        let Some(value) = get_nested_value(doc, &self.path).and_then(parse_number) else {
            return false;
        };
        value >= self.min && self.max.is_none_or(|max| value <= max)
    }

    fn to_condition(&self) -> Value {
        let mut condition = Map::new();
        condition.insert("$gte".to_string(), json!(self.min));
        if let Some(max) = self.max {
            condition.insert("$lte".to_string(), json!(max));
        }
        Value::Object(condition)
    }
}

/// Conjunction of field bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    bounds: Vec<Bound>,
}

impl Query {
    /// Build the query for a set of criteria.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the revenue minimum is missing, and a
    /// data error when a required field is not mapped.
    pub fn from_criteria(criteria: &Criteria, mapping: &FieldMapping) -> Result<Self> {
        criteria.validate()?;

        let mut bounds = Vec::with_capacity(2);
        if let Some(min) = criteria.revenue.min {
            bounds.push(Bound {
                path: mapping.require_path(fields::REVENUE)?.to_string(),
                min,
                max: criteria.revenue_max(),
            });
        }
        if let Some(min) = criteria.min_roe_decimal() {
            bounds.push(Bound {
                path: mapping.require_path(fields::RETURN_ON_EQUITY)?.to_string(),
                min,
                max: None,
            });
        }
        Ok(Self { bounds })
    }

    /// Bounds making up the query.
    pub fn bounds(&self) -> &[Bound] {
        &self.bounds
    }

    /// Filter document for the store, e.g.
    /// `{"Highlights.RevenueTTM": {"$gte": 1000000.0}}`.
    pub fn to_document(&self) -> Value {
        Value::Object(
            self.bounds
                .iter()
                .map(|bound| (bound.path.clone(), bound.to_condition()))
                .collect(),
        )
    }

    /// Whether a document satisfies every bound.
    ///
    /// A missing or non-numeric field fails its bound.
    pub fn matches(&self, doc: &Value) -> bool {
        self.bounds.iter().all(|bound| bound.matches(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScreenError;
    use stockfinder_data::DataError;

    fn criteria(json: &str) -> Criteria {
        Criteria::from_json_str(json).unwrap()
    }

    #[test]
    fn test_revenue_only_query() {
        let query = Query::from_criteria(
            &criteria(r#"{"revenue": {"min": 1000000}}"#),
            &FieldMapping::default(),
        )
        .unwrap();

        assert_eq!(query.bounds().len(), 1);
        assert_eq!(
            query.to_document(),
            json!({"Highlights.RevenueTTM": {"$gte": 1000000.0}})
        );
    }

    #[test]
    fn test_full_query_document() {
        let query = Query::from_criteria(
            &criteria(r#"{"revenue": {"min": 1000, "max": 5000}, "roe": {"min": 12.5}}"#),
            &FieldMapping::default(),
        )
        .unwrap();

        assert_eq!(
            query.to_document(),
            json!({
                "Highlights.RevenueTTM": {"$gte": 1000.0, "$lte": 5000.0},
                "Highlights.ReturnOnEquityTTM": {"$gte": 0.125}
            })
        );
    }

    #[test]
    fn test_validation_precedes_mapping() {
        let empty = FieldMapping::from_pairs(Vec::<(String, String)>::new());
        let err = Query::from_criteria(&criteria("{}"), &empty).unwrap_err();
        assert!(matches!(err, ScreenError::Validation(_)));
    }

    #[test]
    fn test_unmapped_revenue() {
        let mapping = FieldMapping::from_pairs([("name", "General.Name")]);
        let err = Query::from_criteria(&criteria(r#"{"revenue": {"min": 1}}"#), &mapping)
            .unwrap_err();
        assert!(matches!(
            err,
            ScreenError::Data(DataError::UnmappedField(field)) if field == "revenue"
        ));
    }

    #[test]
    fn test_matches_in_memory() {
        let query = Query::from_criteria(
            &criteria(r#"{"revenue": {"min": 1000, "max": 5000}, "roe": {"min": 10}}"#),
            &FieldMapping::default(),
        )
        .unwrap();

        let doc = |revenue: Value, roe: Value| {
            json!({"Highlights": {"RevenueTTM": revenue, "ReturnOnEquityTTM": roe}})
        };

        assert!(query.matches(&doc(json!(1000), json!(0.10))));
        assert!(query.matches(&doc(json!("4,999"), json!("0.5"))));
        assert!(query.matches(&doc(json!(5000), json!(0.2))));
        assert!(!query.matches(&doc(json!(999), json!(0.2))));
        assert!(!query.matches(&doc(json!(5001), json!(0.2))));
        assert!(!query.matches(&doc(json!(2000), json!(0.05))));
        assert!(!query.matches(&doc(json!(null), json!(0.2))));
        assert!(!query.matches(&json!({"General": {}})));
    }
}
