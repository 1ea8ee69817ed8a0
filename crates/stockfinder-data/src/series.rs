//! Date-keyed time series views.
//!
//! Both series kinds are keyed by `YYYY-MM-DD` strings. Only the year prefix
//! is interpreted; the rest of the key is compared lexicographically.

use crate::numeric::parse_number;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// Extract the calendar year from a `YYYY-MM-DD` key.
pub fn year_of(date: &str) -> Option<i32> {
    date.get(..4)?.parse().ok()
}

/// Borrowed view over yearly financial snapshots inside a document.
///
/// Each entry maps a reporting date to an object of statement fields
/// (`totalRevenue`, `ebit`, ...).
#[derive(Debug, Clone, Copy)]
pub struct FinancialSeries<'a> {
    entries: &'a Map<String, Value>,
}

impl<'a> FinancialSeries<'a> {
    /// View a document value as a financial series. Non-objects yield `None`.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(|entries| Self { entries })
    }

    /// Reporting dates, newest first.
    ///
    /// Keys without a leading four-digit year are skipped. Keys sharing a year
    /// keep their full-string order, so the lexicographically greatest date of
    /// a year comes first.
    pub fn dates_descending(&self) -> Vec<&'a str> {
        let mut dates: Vec<&'a str> = self
            .entries
            .keys()
            .map(String::as_str)
            .filter(|date| {
                let valid = year_of(date).is_some();
                if !valid {
                    warn!(key = *date, "Skipping financials entry without a year");
                }
                valid
            })
            .collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates
    }

    /// Snapshot recorded on a given date.
    pub fn snapshot(&self, date: &str) -> Option<&'a Value> {
        self.entries.get(date)
    }

    /// Number of entries, including ones without a parseable year.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the series has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Owned end-of-day price series, ordered by date key.
///
/// Entries are either objects carrying at least a `close` field or bare
/// scalar closes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    entries: BTreeMap<String, Value>,
}

impl PriceSeries {
    /// Create an empty series.
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Build a series from a JSON object. Non-objects yield `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(map.into_iter().collect()),
            _ => None,
        }
    }

    /// Insert or replace the entry for a date.
    pub fn insert(&mut self, date: impl Into<String>, entry: Value) {
        self.entries.insert(date.into(), entry);
    }

    /// Closing price on a date, if present and numeric.
    pub fn close(&self, date: &str) -> Option<f64> {
        self.entries.get(date).and_then(close_of)
    }

    /// Lexicographically greatest date key.
    pub fn latest_date(&self) -> Option<&str> {
        self.entries.keys().next_back().map(String::as_str)
    }

    /// Date keys in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the series has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for PriceSeries {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn close_of(entry: &Value) -> Option<f64> {
    match entry {
        Value::Object(fields) => fields.get("close").and_then(parse_number),
        scalar => parse_number(scalar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_year_of() {
        assert_eq!(year_of("2023-12-31"), Some(2023));
        assert_eq!(year_of("1999"), Some(1999));
        assert_eq!(year_of("99-1-1"), None);
        assert_eq!(year_of(""), None);
        assert_eq!(year_of("abcd-01-01"), None);
    }

    #[test]
    fn test_financial_dates_descending() {
        let value = json!({
            "2021-12-31": {"totalRevenue": "1"},
            "2023-12-31": {"totalRevenue": "3"},
            "bogus": {},
            "2022-12-31": {"totalRevenue": "2"}
        });
        let series = FinancialSeries::from_value(&value).unwrap();
        assert_eq!(series.len(), 4);
        assert_eq!(
            series.dates_descending(),
            vec!["2023-12-31", "2022-12-31", "2021-12-31"]
        );
    }

    #[test]
    fn test_financial_series_rejects_non_object() {
        assert!(FinancialSeries::from_value(&json!([1, 2])).is_none());
        assert!(FinancialSeries::from_value(&Value::Null).is_none());
    }

    #[test]
    fn test_price_close_shapes() {
        let series = PriceSeries::from_value(json!({
            "2020-01-02": {"open": 10.0, "close": 11.5},
            "2021-01-04": "1,020.25",
            "2022-01-03": {"open": 12.0},
            "2023-01-03": 15
        }))
        .unwrap();

        assert_eq!(series.close("2020-01-02"), Some(11.5));
        assert_eq!(series.close("2021-01-04"), Some(1020.25));
        assert_eq!(series.close("2022-01-03"), None);
        assert_eq!(series.close("2023-01-03"), Some(15.0));
        assert_eq!(series.close("2030-01-01"), None);
    }

    #[test]
    fn test_price_latest_and_order() {
        let mut series = PriceSeries::new();
        assert!(series.latest_date().is_none());
        series.insert("2023-06-30", json!({"close": 3.0}));
        series.insert("2018-06-29", json!({"close": 1.0}));
        series.insert("2020-06-30", json!({"close": 2.0}));

        assert_eq!(series.latest_date(), Some("2023-06-30"));
        assert_eq!(
            series.dates().collect::<Vec<_>>(),
            vec!["2018-06-29", "2020-06-30", "2023-06-30"]
        );
    }
}
