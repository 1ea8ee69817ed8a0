#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockfinder/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod criteria;
pub mod error;
pub mod query;
pub mod screen;

// Re-export main types from sub-crates
pub use stockfinder_data as data;
pub use stockfinder_growth as growth;
pub use stockfinder_output as output;

pub use criteria::{Criteria, GrowthCriteria, RevenueCriteria, RoeCriteria, SharePriceCriteria};
pub use error::{Result, ScreenError};
pub use query::{Bound, Query};
pub use screen::{ScreenedRecord, Screener};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
