//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading mappings or price data.
#[derive(Debug, Error)]
pub enum DataError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The field mapping table is structurally unusable
    #[error("Invalid field mapping: {0}")]
    InvalidMapping(String),

    /// A logical field required by an operation is not mapped
    #[error("Field '{0}' is not present in the field mapping")]
    UnmappedField(String),

    /// Price data did not have the expected shape
    #[error("Invalid price data for {symbol}: {reason}")]
    InvalidPrices {
        /// Symbol whose data was rejected
        symbol: String,
        /// Why the data was rejected
        reason: String,
    },
}
