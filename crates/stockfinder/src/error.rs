//! Error types for screening operations.

use stockfinder_data::DataError;
use thiserror::Error;

/// Result type for screening operations.
pub type Result<T> = std::result::Result<T, ScreenError>;

/// Errors surfaced to the caller of a search.
///
/// Per-record problems (missing paths, unparseable numbers, degenerate
/// growth) never appear here; they become `None` values on the record.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// Criteria are incomplete, reported before any data access
    #[error("{0}")]
    Validation(String),

    /// Criteria could not be decoded
    #[error("Invalid criteria: {0}")]
    Criteria(#[from] serde_json::Error),

    /// Field mapping or data loading failure
    #[error(transparent)]
    Data(#[from] DataError),
}
