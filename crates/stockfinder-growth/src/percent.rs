//! Percentage conversions for criteria and display.

/// Round to a fixed number of decimal places.
///
/// Rounds the exact binary value, breaking exact ties to even, so `12.25`
/// becomes `12.2` while `2.675` (stored slightly below) becomes `2.67`.
/// Non-finite values pass through unchanged.
pub fn round_to(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.places$}").parse().unwrap_or(value)
}

/// Convert a percentage such as `15` into its decimal form `0.15`.
pub fn to_percent_decimal(percent: f64) -> f64 {
    percent / 100.0
}

/// Render a decimal growth value as a one-decimal percentage string.
///
/// `0.2599` becomes `"26.0%"`; `None` stays `None`. The unratable sentinel
/// renders as `"-inf%"`.
pub fn format_percentage(growth: Option<f64>) -> Option<String> {
    growth.map(|g| format!("{:.1}%", round_to(g * 100.0, 1)))
}
