//! Share price growth over a lookback window.
//!
//! The recent reference is the close on the latest date in the series. The
//! older reference is the earliest date whose year is at least
//! `recent_year - window_years`, i.e. the start of the requested window
//! rather than the start of the whole history.

use crate::cagr::growth_rate;
use crate::percent::round_to;
use chrono::NaiveDate;
use serde::Serialize;
use stockfinder_data::{PriceSeries, year_of};

const DAYS_PER_YEAR: f64 = 365.25;

/// Share price references and derived growth for one security.
///
/// Growth figures are percentages rounded to one decimal place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SharePriceGrowth {
    /// Latest date in the series.
    pub recent_date: Option<String>,
    /// Close on `recent_date`.
    pub recent_price: Option<f64>,
    /// Earliest date inside the lookback window.
    pub oldest_date: Option<String>,
    /// Close on `oldest_date`.
    pub oldest_price: Option<f64>,
    /// Simple growth between the two closes, in percent.
    pub growth_pct: Option<f64>,
    /// Annualized growth over the elapsed time between the two dates, in percent.
    pub cagr_pct: Option<f64>,
}

impl SharePriceGrowth {
    /// Compute window growth from an end-of-day series.
    ///
    /// A `window_years` of zero anchors the window at the start of the most
    /// recent year. Growth is only reported when the two reference dates fall
    /// in different years and both closes are numeric.
    pub fn from_series(series: &PriceSeries, window_years: u32) -> Self {
        let Some(recent_date) = series.latest_date() else {
            return Self::default();
        };
        let recent_price = series.close(recent_date);

        let oldest_date = year_of(recent_date).and_then(|recent_year| {
            let target_year = recent_year.saturating_sub(i32::try_from(window_years).ok()?);
            series
                .dates()
                .find(|date| year_of(date).is_some_and(|year| year >= target_year))
        });
        let oldest_price = oldest_date.and_then(|date| series.close(date));

        let spans_years = oldest_date.is_some_and(|date| year_of(date) != year_of(recent_date));
        let (growth_pct, cagr_pct) = match (oldest_date, oldest_price, recent_price) {
            (Some(start), Some(old), Some(new)) if spans_years => (
                simple_growth_pct(old, new),
                annualized_growth_pct(start, recent_date, old, new),
            ),
            _ => (None, None),
        };

        Self {
            recent_date: Some(recent_date.to_string()),
            recent_price,
            oldest_date: oldest_date.map(str::to_string),
            oldest_price,
            growth_pct,
            cagr_pct,
        }
    }
}

fn simple_growth_pct(old: f64, new: f64) -> Option<f64> {
    if old == 0.0 {
        return None;
    }
    let pct = (new - old) / old * 100.0;
    pct.is_finite().then(|| round_to(pct, 1))
}

fn annualized_growth_pct(start: &str, end: &str, old: f64, new: f64) -> Option<f64> {
    let elapsed = elapsed_years(start, end)?;
    let pct = growth_rate(old, new, elapsed) * 100.0;
    pct.is_finite().then(|| round_to(pct, 1))
}

/// Fractional years between two `YYYY-MM-DD` dates.
fn elapsed_years(start: &str, end: &str) -> Option<f64> {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").ok()?;
    let end = NaiveDate::parse_from_str(end, "%Y-%m-%d").ok()?;
    let days = (end - start).num_days();
    (days > 0).then(|| days as f64 / DAYS_PER_YEAR)
}
