//! Field mapping between logical names and document paths.
//!
//! The mapping is read once at startup and shared read-only for the life of
//! the process. Screening logic never hardcodes storage paths; it asks the
//! mapping where a logical field such as `revenue` lives.

use crate::error::{DataError, Result};
use crate::path::get_nested_value;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Logical field names the screener relies on.
pub mod fields {
    /// Company display name.
    pub const NAME: &str = "name";
    /// Ticker code.
    pub const CODE: &str = "code";
    /// Listing exchange.
    pub const EXCHANGE: &str = "exchange";
    /// Country of domicile.
    pub const COUNTRY: &str = "country";
    /// Trailing revenue used for the revenue range criterion.
    pub const REVENUE: &str = "revenue";
    /// Return on equity (decimal).
    pub const RETURN_ON_EQUITY: &str = "return_on_equity";
    /// Reporting currency symbol.
    pub const CURRENCY_SYMBOL: &str = "currency_symbol";
    /// Document identifier used to derive price-series symbols.
    pub const IDENTIFIER: &str = "identifier";
    /// Primary listing ticker, the fallback price-series symbol.
    pub const PRIMARY_TICKER: &str = "primary_ticker";
    /// Date-keyed yearly financial statements.
    pub const FINANCIALS: &str = "financials";
}

/// Location of one logical field inside a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Dot-separated path into the stored document.
    pub mongodb_field: String,
}

impl FieldSpec {
    /// Create a field spec for the given path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            mongodb_field: path.into(),
        }
    }
}

/// Immutable table of logical field name to document path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    mappings: BTreeMap<String, FieldSpec>,
}

impl FieldMapping {
    /// Build a mapping from `(logical name, path)` pairs.
    pub fn from_pairs<I, K, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<String>,
    {
        Self {
            mappings: pairs
                .into_iter()
                .map(|(k, p)| (k.into(), FieldSpec::new(p)))
                .collect(),
        }
    }

    /// Parse a mapping file of the form `{"mappings": {name: {"mongodb_field": path}}}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any path is empty.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mapping: Self = serde_json::from_str(json)?;
        mapping.validate()?;
        Ok(mapping)
    }

    /// Load a mapping file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid mapping.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    fn validate(&self) -> Result<()> {
        if let Some((name, _)) = self
            .mappings
            .iter()
            .find(|(_, spec)| spec.mongodb_field.trim().is_empty())
        {
            return Err(DataError::InvalidMapping(format!(
                "empty path for '{name}'"
            )));
        }
        Ok(())
    }

    /// Document path for a logical field.
    pub fn path(&self, logical: &str) -> Option<&str> {
        self.mappings
            .get(logical)
            .map(|spec| spec.mongodb_field.as_str())
    }

    /// Document path for a logical field that must be mapped.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::UnmappedField`] when the field is absent.
    pub fn require_path(&self, logical: &str) -> Result<&str> {
        self.path(logical)
            .ok_or_else(|| DataError::UnmappedField(logical.to_string()))
    }

    /// Whether a logical field is mapped.
    pub fn contains(&self, logical: &str) -> bool {
        self.mappings.contains_key(logical)
    }

    /// Resolve a logical field against a document.
    ///
    /// Unmapped fields and missing paths both yield `None`.
    pub fn lookup<'a>(&self, doc: &'a Value, logical: &str) -> Option<&'a Value> {
        get_nested_value(doc, self.path(logical)?)
    }

    /// Number of mapped fields.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl Default for FieldMapping {
    /// Mapping for EOD-style fundamentals documents.
    fn default() -> Self {
        Self::from_pairs([
            (fields::NAME, "General.Name"),
            (fields::CODE, "General.Code"),
            (fields::EXCHANGE, "General.Exchange"),
            (fields::COUNTRY, "General.CountryName"),
            (fields::REVENUE, "Highlights.RevenueTTM"),
            (fields::RETURN_ON_EQUITY, "Highlights.ReturnOnEquityTTM"),
            (fields::CURRENCY_SYMBOL, "General.CurrencySymbol"),
            (fields::IDENTIFIER, "General.Code"),
            (fields::PRIMARY_TICKER, "General.PrimaryTicker"),
            (fields::FINANCIALS, "Financials.Income_Statement.yearly"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_str() {
        let mapping = FieldMapping::from_json_str(
            r#"{"mappings": {"revenue": {"mongodb_field": "Highlights.RevenueTTM"}}}"#,
        )
        .unwrap();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.path("revenue"), Some("Highlights.RevenueTTM"));
        assert!(mapping.path("name").is_none());
    }

    #[test]
    fn test_rejects_empty_path() {
        let err = FieldMapping::from_json_str(
            r#"{"mappings": {"revenue": {"mongodb_field": "  "}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DataError::InvalidMapping(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = FieldMapping::from_json_str(r#"{"mappings": []}"#).unwrap_err();
        assert!(matches!(err, DataError::Json(_)));
    }

    #[test]
    fn test_require_path() {
        let mapping = FieldMapping::default();
        assert_eq!(
            mapping.require_path(fields::FINANCIALS).unwrap(),
            "Financials.Income_Statement.yearly"
        );
        assert!(matches!(
            mapping.require_path("nope"),
            Err(DataError::UnmappedField(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_lookup() {
        let mapping = FieldMapping::default();
        let doc = json!({"General": {"Name": "Acme", "Code": "ACME"}});
        assert_eq!(mapping.lookup(&doc, fields::NAME), Some(&json!("Acme")));
        assert!(mapping.lookup(&doc, fields::REVENUE).is_none());
        assert!(mapping.lookup(&doc, "unmapped").is_none());
    }

    #[test]
    fn test_default_covers_screening_fields() {
        let mapping = FieldMapping::default();
        for field in [
            fields::NAME,
            fields::CODE,
            fields::EXCHANGE,
            fields::COUNTRY,
            fields::REVENUE,
            fields::RETURN_ON_EQUITY,
            fields::CURRENCY_SYMBOL,
            fields::IDENTIFIER,
            fields::PRIMARY_TICKER,
            fields::FINANCIALS,
        ] {
            assert!(mapping.contains(field), "missing {field}");
        }
    }
}
