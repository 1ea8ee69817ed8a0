//! Compound annual growth over yearly financial snapshots.
//!
//! Growth is measured between the most recent reporting year and the year
//! `years_back` before it:
//!
//! ```text
//! cagr = (recent / old)^(1 / years_back) - 1
//! ```
//!
//! Missing years and unparseable values give `None`. Non-positive endpoints
//! give negative infinity, which sorts below every threshold.

use serde_json::Value;
use stockfinder_data::{FinancialSeries, parse_number, year_of};

/// Read one field from a single year's snapshot.
///
/// String values may carry thousands separators. Missing, null and
/// unparseable values all yield `None`.
pub fn value_for_year(snapshot: &Value, field: &str) -> Option<f64> {
    snapshot.as_object()?.get(field).and_then(parse_number)
}

/// Compound annual growth rate from `initial` to `final_value` over `years`.
///
/// Returns `f64::NEG_INFINITY` when either endpoint is non-positive or the
/// span is not positive, since the compound root is undefined there.
pub fn growth_rate(initial: f64, final_value: f64, years: f64) -> f64 {
    if initial <= 0.0 || final_value <= 0.0 || years <= 0.0 {
        return f64::NEG_INFINITY;
    }
    (final_value / initial).powf(1.0 / years) - 1.0
}

/// Growth of `field` between the latest reporting year and `years_back`
/// years earlier.
///
/// Dates are scanned newest first. Within a year the first date encountered
/// is used, which is the lexicographically greatest one.
///
/// Returns `None` when the series holds fewer than two dates, when
/// `years_back` is zero, when either year has no snapshot, or when either
/// value cannot be read.
pub fn calculate_growth(
    series: &FinancialSeries<'_>,
    field: &str,
    years_back: u32,
) -> Option<f64> {
    if years_back == 0 {
        return None;
    }

    let dates = series.dates_descending();
    if dates.len() < 2 {
        return None;
    }

    let most_recent_year = year_of(dates[0])?;
    let target_year = most_recent_year.checked_sub(i32::try_from(years_back).ok()?)?;

    let mut recent_date = None;
    let mut old_date = None;
    for &date in &dates {
        let year = year_of(date);
        if recent_date.is_none() && year == Some(most_recent_year) {
            recent_date = Some(date);
        }
        if old_date.is_none() && year == Some(target_year) {
            old_date = Some(date);
        }
        if recent_date.is_some() && old_date.is_some() {
            break;
        }
    }

    let recent = value_for_year(series.snapshot(recent_date?)?, field)?;
    let old = value_for_year(series.snapshot(old_date?)?, field)?;

    Some(growth_rate(old, recent, f64::from(years_back)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(100.0, 200.0, 1.0, 1.0)]
    #[case(100.0, 200.0, 3.0, 2f64.powf(1.0 / 3.0) - 1.0)]
    #[case(200.0, 100.0, 2.0, 0.5f64.sqrt() - 1.0)]
    #[case(50.0, 50.0, 5.0, 0.0)]
    #[case(100.0, 150.0, 2.5, 1.5f64.powf(0.4) - 1.0)]
    fn test_growth_rate(
        #[case] initial: f64,
        #[case] final_value: f64,
        #[case] years: f64,
        #[case] expected: f64,
    ) {
        assert_relative_eq!(
            growth_rate(initial, final_value, years),
            expected,
            epsilon = 1e-12
        );
    }

    #[rstest]
    #[case(0.0, 100.0, 3.0)]
    #[case(-10.0, 100.0, 3.0)]
    #[case(100.0, 0.0, 3.0)]
    #[case(100.0, -5.0, 3.0)]
    #[case(100.0, 200.0, 0.0)]
    fn test_growth_rate_unratable(
        #[case] initial: f64,
        #[case] final_value: f64,
        #[case] years: f64,
    ) {
        assert_eq!(growth_rate(initial, final_value, years), f64::NEG_INFINITY);
    }

    #[test]
    fn test_value_for_year() {
        let snapshot = json!({"totalRevenue": "1,500,000", "ebit": 250.5, "netIncome": null, "bad": "x"});
        assert_eq!(value_for_year(&snapshot, "totalRevenue"), Some(1_500_000.0));
        assert_eq!(value_for_year(&snapshot, "ebit"), Some(250.5));
        assert_eq!(value_for_year(&snapshot, "netIncome"), None);
        assert_eq!(value_for_year(&snapshot, "bad"), None);
        assert_eq!(value_for_year(&snapshot, "missing"), None);
        assert_eq!(value_for_year(&json!(null), "ebit"), None);
    }

    #[test]
    fn test_three_year_revenue_growth() {
        let data = json!({
            "2020-01-01": {"totalRevenue": "100"},
            "2023-01-01": {"totalRevenue": "200"}
        });
        let series = FinancialSeries::from_value(&data).unwrap();
        let growth = calculate_growth(&series, "totalRevenue", 3).unwrap();
        assert_relative_eq!(growth, 2f64.powf(1.0 / 3.0) - 1.0, epsilon = 1e-12);
        assert_relative_eq!(growth, 0.2599, epsilon = 1e-4);
    }

    #[test]
    fn test_single_date_is_not_enough() {
        let data = json!({"2023-12-31": {"totalRevenue": "200"}});
        let series = FinancialSeries::from_value(&data).unwrap();
        assert!(calculate_growth(&series, "totalRevenue", 1).is_none());
    }

    #[test]
    fn test_two_dates_in_one_year_are_not_enough() {
        let data = json!({
            "2023-03-31": {"totalRevenue": "150"},
            "2023-12-31": {"totalRevenue": "200"}
        });
        let series = FinancialSeries::from_value(&data).unwrap();
        assert!(calculate_growth(&series, "totalRevenue", 1).is_none());
    }

    #[test]
    fn test_target_year_absent() {
        let data = json!({
            "2021-12-31": {"totalRevenue": "100"},
            "2023-12-31": {"totalRevenue": "200"}
        });
        let series = FinancialSeries::from_value(&data).unwrap();
        assert!(calculate_growth(&series, "totalRevenue", 1).is_none());
        assert!(calculate_growth(&series, "totalRevenue", 5).is_none());
        assert!(calculate_growth(&series, "totalRevenue", 2).is_some());
    }

    #[test]
    fn test_zero_years_back() {
        let data = json!({
            "2022-12-31": {"totalRevenue": "100"},
            "2023-12-31": {"totalRevenue": "200"}
        });
        let series = FinancialSeries::from_value(&data).unwrap();
        assert!(calculate_growth(&series, "totalRevenue", 0).is_none());
    }

    #[test]
    fn test_missing_field_value() {
        let data = json!({
            "2022-12-31": {"totalRevenue": "100"},
            "2023-12-31": {"ebit": "20"}
        });
        let series = FinancialSeries::from_value(&data).unwrap();
        assert!(calculate_growth(&series, "totalRevenue", 1).is_none());
        assert!(calculate_growth(&series, "ebit", 1).is_none());
    }

    #[test]
    fn test_negative_base_is_unratable() {
        let data = json!({
            "2022-12-31": {"ebit": "-50"},
            "2023-12-31": {"ebit": "20"}
        });
        let series = FinancialSeries::from_value(&data).unwrap();
        assert_eq!(calculate_growth(&series, "ebit", 1), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_same_year_duplicates_use_first_in_descending_order() {
        let data = json!({
            "2023-03-31": {"totalRevenue": "150"},
            "2023-12-31": {"totalRevenue": "200"},
            "2022-03-31": {"totalRevenue": "50"},
            "2022-12-31": {"totalRevenue": "100"}
        });
        let series = FinancialSeries::from_value(&data).unwrap();
        // 2023-12-31 and 2022-12-31 come first in the descending scan.
        let growth = calculate_growth(&series, "totalRevenue", 1).unwrap();
        assert_relative_eq!(growth, 1.0, epsilon = 1e-12);
    }
}
