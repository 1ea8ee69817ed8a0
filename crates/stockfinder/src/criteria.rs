//! User screening criteria.
//!
//! Criteria arrive as JSON from a search form, so every threshold accepts
//! either a number or a numeric string, and blank values mean "not set".
//! ROE and growth minimums are percentages and are converted to decimals
//! before comparison.

use crate::error::{Result, ScreenError};
use serde::{Deserialize, Serialize};
use stockfinder_growth::to_percent_decimal;

/// Full set of screening criteria.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Criteria {
    /// Revenue range; the minimum is mandatory.
    pub revenue: RevenueCriteria,
    /// Minimum return on equity, in percent.
    pub roe: RoeCriteria,
    /// Minimum revenue CAGR over a number of years.
    pub revenue_growth: GrowthCriteria,
    /// Minimum EBIT CAGR over a number of years.
    pub earnings_growth: GrowthCriteria,
    /// Share price lookback window.
    pub share_price: SharePriceCriteria,
}

/// Absolute revenue bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevenueCriteria {
    /// Inclusive lower bound.
    #[serde(deserialize_with = "lenient::optional_number")]
    pub min: Option<f64>,
    /// Inclusive upper bound.
    #[serde(deserialize_with = "lenient::optional_number")]
    pub max: Option<f64>,
}

/// Return on equity threshold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoeCriteria {
    /// Minimum ROE in percent.
    #[serde(deserialize_with = "lenient::optional_number")]
    pub min: Option<f64>,
}

/// Growth threshold over a lookback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthCriteria {
    /// Minimum compound annual growth in percent.
    #[serde(deserialize_with = "lenient::optional_number")]
    pub min: Option<f64>,
    /// Lookback in years. Growth is only computed when this is set.
    #[serde(deserialize_with = "lenient::optional_years")]
    pub years: Option<u32>,
}

impl GrowthCriteria {
    /// Minimum growth as a decimal.
    pub fn min_decimal(&self) -> Option<f64> {
        self.min.map(to_percent_decimal)
    }
}

/// Share price lookback, independent of the fundamentals growth windows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharePriceCriteria {
    /// Lookback in years from the most recent price year.
    #[serde(deserialize_with = "lenient::optional_years")]
    pub years: Option<u32>,
}

impl Criteria {
    /// Decode criteria from request JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Criteria`] when the JSON is malformed or a
    /// threshold is not numeric.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check that the mandatory revenue minimum is present.
    ///
    /// A minimum of zero counts as missing.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Validation`] when the minimum is absent.
    pub fn validate(&self) -> Result<()> {
        match self.revenue.min {
            Some(min) if min != 0.0 => Ok(()),
            _ => Err(ScreenError::Validation(
                "Minimum revenue is required".to_string(),
            )),
        }
    }

    /// Upper revenue bound, ignoring a zero maximum.
    pub fn revenue_max(&self) -> Option<f64> {
        self.revenue.max.filter(|max| *max != 0.0)
    }

    /// Minimum ROE as a decimal, ignoring a zero minimum.
    pub fn min_roe_decimal(&self) -> Option<f64> {
        self.roe
            .min
            .filter(|min| *min != 0.0)
            .map(to_percent_decimal)
    }

    /// Share price lookback in years; zero when unset.
    pub fn share_price_window(&self) -> u32 {
        self.share_price.years.unwrap_or(0)
    }
}

mod lenient {
    use serde::de::{Deserializer, Error};
    use serde::Deserialize;
    use serde_json::Value;
    use stockfinder_data::numeric::parse_numeric_str;

    pub(super) fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => Ok(n.as_f64()),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => parse_numeric_str(&s)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid number: {s:?}"))),
            Some(other) => Err(D::Error::custom(format!("expected a number, got {other}"))),
        }
    }

    pub(super) fn optional_years<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match optional_number(deserializer)? {
            None => Ok(None),
            Some(years) if years >= 0.0 && years.fract() == 0.0 && years <= f64::from(u32::MAX) => {
                Ok(Some(years as u32))
            }
            Some(years) => Err(D::Error::custom(format!(
                "years must be a non-negative whole number, got {years}"
            ))),
        }
    }
}
