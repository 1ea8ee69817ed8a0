//! Dot-notation lookup over nested JSON documents.

use serde_json::Value;

/// Get a value from a nested document using a dot-separated path.
///
/// Each path segment must name a key of a JSON object. Traversal stops with
/// `None` as soon as a segment is missing or the current value is not an
/// object, so arrays and scalars are never indexed into.
///
/// # Example
/// ```
/// use serde_json::json;
/// use stockfinder_data::get_nested_value;
///
/// let doc = json!({"General": {"Code": "AAPL"}});
/// assert_eq!(get_nested_value(&doc, "General.Code"), Some(&json!("AAPL")));
/// assert_eq!(get_nested_value(&doc, "General.Name"), None);
/// ```
pub fn get_nested_value<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(doc, |current, part| current.as_object()?.get(part))
}
