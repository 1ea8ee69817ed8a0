//! Flat, display-ready screening records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Presentation and export column order, identical for every request.
pub const FIELD_ORDER: [&str; 10] = [
    "name",
    "code",
    "exchange",
    "country",
    "revenue",
    "return_on_equity",
    "revenue_growth",
    "earnings_growth",
    "share_price_growth",
    "share_price_cagr",
];

/// Every field carried by a [`TransformedRecord`], in serialization order.
pub const ALL_FIELDS: [&str; 16] = [
    "name",
    "code",
    "exchange",
    "country",
    "revenue",
    "return_on_equity",
    "currency_symbol",
    "identifier",
    "revenue_growth",
    "earnings_growth",
    "share_price_recent",
    "share_price_recent_date",
    "share_price_oldest",
    "share_price_oldest_date",
    "share_price_growth",
    "share_price_cagr",
];

/// One screened company flattened for display.
///
/// Identity fields are copied verbatim from the source document and are
/// `Value::Null` when their path is missing. Growth fields are preformatted
/// percentages (`"12.3%"`); share price growth is a one-decimal percentage
/// number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformedRecord {
    /// Company name.
    pub name: Value,
    /// Ticker code.
    pub code: Value,
    /// Listing exchange.
    pub exchange: Value,
    /// Country of domicile.
    pub country: Value,
    /// Trailing revenue.
    pub revenue: Value,
    /// Return on equity.
    pub return_on_equity: Value,
    /// Reporting currency symbol.
    pub currency_symbol: Value,
    /// Document identifier.
    pub identifier: Value,
    /// Revenue CAGR, formatted.
    pub revenue_growth: Option<String>,
    /// Earnings (EBIT) CAGR, formatted.
    pub earnings_growth: Option<String>,
    /// Latest close.
    pub share_price_recent: Option<f64>,
    /// Date of the latest close.
    pub share_price_recent_date: Option<String>,
    /// Close at the start of the lookback window.
    pub share_price_oldest: Option<f64>,
    /// Date of the window-start close.
    pub share_price_oldest_date: Option<String>,
    /// Simple share price growth over the window, in percent.
    pub share_price_growth: Option<f64>,
    /// Annualized share price growth over the window, in percent.
    pub share_price_cagr: Option<f64>,
}

impl TransformedRecord {
    /// Value of a named field, or `None` if the record has no such field.
    pub fn field(&self, name: &str) -> Option<Value> {
        let value = match name {
            "name" => self.name.clone(),
            "code" => self.code.clone(),
            "exchange" => self.exchange.clone(),
            "country" => self.country.clone(),
            "revenue" => self.revenue.clone(),
            "return_on_equity" => self.return_on_equity.clone(),
            "currency_symbol" => self.currency_symbol.clone(),
            "identifier" => self.identifier.clone(),
            "revenue_growth" => self.revenue_growth.clone().into(),
            "earnings_growth" => self.earnings_growth.clone().into(),
            "share_price_recent" => self.share_price_recent.into(),
            "share_price_recent_date" => self.share_price_recent_date.clone().into(),
            "share_price_oldest" => self.share_price_oldest.into(),
            "share_price_oldest_date" => self.share_price_oldest_date.clone().into(),
            "share_price_growth" => self.share_price_growth.into(),
            "share_price_cagr" => self.share_price_cagr.into(),
            _ => return None,
        };
        Some(value)
    }
}

/// Envelope returned by a search, mirroring the service response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Whether the search succeeded.
    pub success: bool,
    /// Matching records in input order.
    pub data: Vec<TransformedRecord>,
    /// Column order for presentation.
    #[serde(rename = "fieldOrder")]
    pub field_order: Vec<String>,
}

impl SearchResponse {
    /// Successful response using [`FIELD_ORDER`].
    pub fn new(data: Vec<TransformedRecord>) -> Self {
        Self {
            success: true,
            data,
            field_order: FIELD_ORDER.iter().map(|f| f.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_fields_serialized_as_null() {
        let record = TransformedRecord::default();
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), ALL_FIELDS.len());
        for field in ALL_FIELDS {
            assert_eq!(object.get(field), Some(&Value::Null), "{field}");
        }
    }

    #[test]
    fn test_serialization_order_matches_all_fields() {
        let value = serde_json::to_value(TransformedRecord::default()).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ALL_FIELDS);
    }

    #[test]
    fn test_field_accessor_covers_all_fields() {
        let record = TransformedRecord {
            name: json!("Acme"),
            revenue: json!(1_000_000),
            revenue_growth: Some("12.3%".to_string()),
            share_price_cagr: Some(8.5),
            ..Default::default()
        };

        for field in ALL_FIELDS {
            assert!(record.field(field).is_some(), "{field}");
        }
        assert_eq!(record.field("name"), Some(json!("Acme")));
        assert_eq!(record.field("revenue_growth"), Some(json!("12.3%")));
        assert_eq!(record.field("share_price_cagr"), Some(json!(8.5)));
        assert_eq!(record.field("earnings_growth"), Some(Value::Null));
        assert!(record.field("unknown").is_none());
    }

    #[test]
    fn test_field_order_is_subset() {
        for field in FIELD_ORDER {
            assert!(ALL_FIELDS.contains(&field));
        }
    }

    #[test]
    fn test_search_response_shape() {
        let response = SearchResponse::new(vec![TransformedRecord::default()]);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"].as_array().unwrap().len(), 1);
        assert_eq!(value["fieldOrder"].as_array().unwrap().len(), FIELD_ORDER.len());
    }
}
