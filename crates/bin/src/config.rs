//! Configuration resolution for the CLI.
//!
//! The field mapping is looked up in order:
//! 1. an explicit `--mapping` path,
//! 2. the platform config directory (`~/.config/stockfinder/field_mapping.json` on Linux),
//! 3. the built-in default table.

use std::path::{Path, PathBuf};
use stockfinder::data::{DataError, FieldMapping};
use tracing::debug;

/// Default location of the field mapping file.
pub(crate) fn default_mapping_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stockfinder").join("field_mapping.json"))
}

/// Load the field mapping used for this run.
pub(crate) fn load_mapping(explicit: Option<&Path>) -> Result<FieldMapping, DataError> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "Loading field mapping");
        return FieldMapping::from_path(path);
    }
    match default_mapping_path() {
        Some(path) if path.exists() => {
            debug!(path = %path.display(), "Loading field mapping from config directory");
            FieldMapping::from_path(path)
        }
        _ => {
            debug!("Using built-in field mapping");
            Ok(FieldMapping::default())
        }
    }
}

/// Read a JSON array of documents.
pub(crate) fn load_documents(path: &Path) -> Result<Vec<serde_json::Value>, DataError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
