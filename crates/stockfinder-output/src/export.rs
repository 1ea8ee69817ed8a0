//! Export functionality for screening results.
//!
//! Results are written as CSV with a fixed header, or as JSON. Exporting an
//! empty batch is rejected so callers never produce a header-only file.

use crate::record::{FIELD_ORDER, SearchResponse, TransformedRecord};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Nothing to export.
    #[error("No data to export")]
    EmptyBatch,

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" | "prettyjson" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// Client-supplied rows to export, as posted back by a results page.
///
/// When `field_order` is absent the keys of the first row, in their original
/// order, become the header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Rows to export.
    #[serde(default)]
    pub data: Vec<Map<String, Value>>,
    /// Optional explicit column order.
    #[serde(rename = "fieldOrder", default)]
    pub field_order: Option<Vec<String>>,
}

impl ExportRequest {
    /// Header used for CSV output.
    pub fn header(&self) -> Vec<String> {
        self.field_order.clone().unwrap_or_else(|| {
            self.data
                .first()
                .map(|row| row.keys().cloned().collect())
                .unwrap_or_default()
        })
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch is empty or serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl Exporter for Vec<TransformedRecord> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        if self.is_empty() {
            return Err(ExportError::EmptyBatch);
        }
        match format {
            ExportFormat::Csv => {
                write_csv(&FIELD_ORDER[..], self.as_slice(), |record, field| {
                    record.field(field).unwrap_or(Value::Null)
                })
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for SearchResponse {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        if self.data.is_empty() {
            return Err(ExportError::EmptyBatch);
        }
        match format {
            ExportFormat::Csv => write_csv(
                self.field_order.as_slice(),
                self.data.as_slice(),
                |record, field| record.field(field).unwrap_or(Value::Null),
            ),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for ExportRequest {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        if self.data.is_empty() {
            return Err(ExportError::EmptyBatch);
        }
        match format {
            ExportFormat::Csv => {
                let header = self.header();
                write_csv(header.as_slice(), self.data.as_slice(), |row, field| {
                    row.get(field).cloned().unwrap_or(Value::Null)
                })
            }
            ExportFormat::Json => Ok(serde_json::to_string(&self.data)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(&self.data)?),
        }
    }
}

/// Write a header plus one row per item. Fields not in the header are
/// ignored; header fields missing from an item become empty cells.
fn write_csv<T, S, F>(header: &[S], items: &[T], value_of: F) -> Result<String, ExportError>
where
    S: AsRef<str>,
    F: Fn(&T, &str) -> Value,
{
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(header.iter().map(AsRef::as_ref))?;
    for item in items {
        wtr.write_record(
            header
                .iter()
                .map(|field| cell(&value_of(item, field.as_ref()))),
        )?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| ExportError::InvalidFormat(e.to_string()))
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
