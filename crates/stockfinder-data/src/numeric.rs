//! Defensive numeric conversion for document fields.
//!
//! Fundamentals feeds mix JSON numbers with numeric strings that carry
//! thousands separators (`"1,234,567.00"`). Every numeric read in the
//! workspace goes through [`parse_number`].

use serde_json::Value;
use tracing::warn;

/// Convert a document value into an `f64`.
///
/// Numbers are returned as-is. Strings have their thousands separators and
/// surrounding whitespace removed before parsing. `null`, booleans, arrays,
/// objects and unparseable strings yield `None`; unparseable strings are
/// logged since they usually indicate a feed problem rather than a gap.
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_str(s),
        Value::Null => None,
        other => {
            warn!(value = %other, "Could not convert value to float");
            None
        }
    }
}

/// Parse a numeric string, tolerating thousands separators.
///
/// Empty strings are treated as missing without a warning.
pub fn parse_numeric_str(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    match cleaned.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(value = raw, "Could not convert value to float");
            None
        }
    }
}
