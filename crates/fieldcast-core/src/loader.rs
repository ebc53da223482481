//! Mapping table loading
//!
//! The builder is agnostic about where the table comes from; any reader
//! that yields the six-field row contract works. This module provides the
//! JSON-backed reader: a file or value holding an array of rows. Rows with
//! an empty source field are dropped before they reach the builder.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{rules_from_rows, MappingRow, MappingRule};

/// Load mapping rules from a JSON file containing an array of rows
pub fn load_mappings_from_path(path: impl AsRef<Path>) -> Result<Vec<MappingRule>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        message: format!("Failed to read mapping table from {:?}", path),
        source: e,
    })?;
    load_mappings_from_str(&content)
}

/// Parse mapping rules from a JSON string
pub fn load_mappings_from_str(content: &str) -> Result<Vec<MappingRule>> {
    let rows: Vec<MappingRow> = serde_json::from_str(content).map_err(|e| Error::Json {
        message: format!("Failed to parse mapping table: {}", e),
        source: e,
    })?;
    rules_from_rows(&rows)
}

/// Parse mapping rules from an already-deserialized JSON value
pub fn load_mappings_from_value(value: serde_json::Value) -> Result<Vec<MappingRule>> {
    let rows: Vec<MappingRow> = serde_json::from_value(value).map_err(|e| Error::Json {
        message: format!("Failed to parse mapping table: {}", e),
        source: e,
    })?;
    rules_from_rows(&rows)
}
