#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockfinder/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod record;

pub use export::{ExportError, ExportFormat, ExportRequest, Exporter};
pub use record::{ALL_FIELDS, FIELD_ORDER, SearchResponse, TransformedRecord};
