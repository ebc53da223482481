//! Error types for the Fieldcast core library
//!
//! This module defines the error taxonomy for mapping-driven XML projection,
//! using thiserror for ergonomic error definitions. All failures surface to
//! the caller of `build`; there is no partial-success mode.

use thiserror::Error;

/// Main error type for Fieldcast operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or empty mapping table (no rules, inconsistent root path,
    /// empty path segments). Raised before any tree construction begins.
    #[error("Mapping error: {message}")]
    Mapping { message: String },

    /// A rule names a source field that does not exist on the resolved
    /// object. Fatal for the whole build: it signals mapping/data-model
    /// drift rather than a missing value.
    #[error("Field '{field}' not found on type '{type_name}'")]
    FieldNotFound { type_name: String, field: String },

    /// A scalar value could not be parsed as its declared source or target
    /// type. Carries the offending value and both type tags for diagnostics.
    #[error("Cannot convert value '{value}' from {source_type} to {target_type}: {message}")]
    Conversion {
        value: String,
        source_type: String,
        target_type: String,
        message: String,
    },

    /// JSON parsing errors from the mapping loader or a structural source
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors from the mapping loader
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a mapping-table error
    pub fn mapping(message: impl Into<String>) -> Self {
        Self::Mapping {
            message: message.into(),
        }
    }

    /// Create a field-not-found error
    pub fn field_not_found(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::FieldNotFound {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    /// Create a conversion error carrying the offending value and both tags
    pub fn conversion(
        value: impl Into<String>,
        source_type: impl Into<String>,
        target_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Conversion {
            value: value.into(),
            source_type: source_type.into(),
            target_type: target_type.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for Fieldcast operations
pub type Result<T> = std::result::Result<T, Error>;
