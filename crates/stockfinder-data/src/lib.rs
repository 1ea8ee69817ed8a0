#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockfinder/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod mapping;
pub mod numeric;
pub mod path;
pub mod prices;
pub mod series;

pub use error::{DataError, Result};
pub use mapping::{FieldMapping, FieldSpec};
pub use numeric::parse_number;
pub use path::get_nested_value;
pub use prices::{InMemoryPriceStore, PriceLookup};
pub use series::{FinancialSeries, PriceSeries, year_of};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
