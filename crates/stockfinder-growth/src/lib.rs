#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockfinder/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cagr;
pub mod percent;
pub mod share_price;

pub use cagr::{calculate_growth, growth_rate, value_for_year};
pub use percent::{format_percentage, round_to, to_percent_decimal};
pub use share_price::SharePriceGrowth;

/// Financial statement field compared for revenue growth.
pub const REVENUE_FIELD: &str = "totalRevenue";

/// Financial statement field compared for earnings growth.
pub const EARNINGS_FIELD: &str = "ebit";
