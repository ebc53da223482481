//! Core types for the Fieldcast mapping table
//!
//! This module defines the mapping-rule data structures consumed by the tree
//! builder. Raw rows arrive from an external reader (spreadsheet, CSV, JSON
//! config - any source satisfying the row contract) as six plain strings;
//! they are resolved once at load time into typed rules so that no
//! string-based type dispatch happens during traversal.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Logical scalar type tag for source fields and target nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    String,
    Integer,
    Float,
    Double,
    Boolean,
}

impl ScalarType {
    /// Parse a type tag, falling back to `String` for unknown tags.
    ///
    /// The fallback is permissive by contract: an unrecognized tag renders
    /// as plain text rather than failing the load.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "string" => Self::String,
            "integer" | "int" => Self::Integer,
            "float" => Self::Float,
            "double" => Self::Double,
            "boolean" | "bool" => Self::Boolean,
            other => {
                if !other.is_empty() {
                    tracing::debug!(tag = other, "unknown scalar type tag, treating as string");
                }
                Self::String
            }
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Double => "double",
            Self::Boolean => "boolean",
        };
        write!(f, "{}", name)
    }
}

/// What a collection-typed source field contains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Elements are scalars, e.g. `List<string>`
    Scalar(ScalarType),
    /// Elements are nested objects, e.g. `List<Task>`
    Object,
}

/// Resolved source type tag: a plain scalar or a collection marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    Scalar(ScalarType),
    Collection(ElementKind),
}

impl SourceType {
    /// Parse a source type tag. Collection markers use `List<...>` syntax
    /// (case-insensitive); an inner tag that is itself a scalar tag yields
    /// scalar elements, anything else yields object elements.
    pub fn parse(tag: &str) -> Self {
        let trimmed = tag.trim();
        let lower = trimmed.to_ascii_lowercase();
        if let Some(inner) = lower.strip_prefix("list<").and_then(|s| s.strip_suffix('>')) {
            let kind = match inner {
                "string" | "integer" | "int" | "float" | "double" | "boolean" | "bool" => {
                    ElementKind::Scalar(ScalarType::parse(inner))
                }
                _ => ElementKind::Object,
            };
            return Self::Collection(kind);
        }
        Self::Scalar(ScalarType::parse(trimmed))
    }

    /// Whether this tag is a collection marker
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(_))
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => write!(f, "{}", s),
            Self::Collection(ElementKind::Scalar(s)) => write!(f, "list<{}>", s),
            Self::Collection(ElementKind::Object) => write!(f, "list<object>"),
        }
    }
}

/// A slash-delimited output-tree path, parsed and validated at load time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingPath {
    segments: Vec<String>,
}

impl MappingPath {
    /// Parse a slash-delimited path. Empty paths and empty segments are
    /// rejected before any tree construction begins.
    pub fn parse(path: &str) -> Result<Self> {
        if path.trim().is_empty() {
            return Err(Error::mapping("empty path in mapping rule"));
        }
        let segments: Vec<String> = path.split('/').map(|s| s.trim().to_string()).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(Error::mapping(format!(
                "path '{}' contains an empty segment",
                path
            )));
        }
        Ok(Self { segments })
    }

    /// Path segments, root first
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The first segment: the document root name
    pub fn root(&self) -> &str {
        &self.segments[0]
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether this path starts with the given segment prefix
    pub fn starts_with(&self, prefix: &[String]) -> bool {
        self.segments.len() >= prefix.len() && self.segments[..prefix.len()] == *prefix
    }
}

impl fmt::Display for MappingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

/// Raw mapping-table row as produced by an external reader
///
/// All six fields are plain strings; type tags and paths are resolved when
/// the row is turned into a [`MappingRule`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingRow {
    /// Free-text classification tag; informational, not load-bearing
    #[serde(default)]
    pub group: String,
    /// Name of the field to read off the current source object
    #[serde(alias = "sourceField")]
    pub source_field: String,
    /// Logical type of that field, or a `List<...>` collection marker
    #[serde(alias = "sourceType")]
    pub source_type: String,
    /// Name of the node to emit in the output tree
    #[serde(alias = "targetNode", alias = "targetNodeName")]
    pub target_node: String,
    /// Logical type to coerce into before emission
    #[serde(alias = "targetType")]
    pub target_type: String,
    /// Slash-delimited ancestry of the node, rooted at the document root
    pub path: String,
}

/// One resolved mapping rule: the immutable unit the tree builder consumes
#[derive(Debug, Clone)]
pub struct MappingRule {
    pub group: String,
    pub source_field: String,
    pub source_type: SourceType,
    pub target_node: String,
    pub target_type: ScalarType,
    pub path: MappingPath,
}

impl MappingRule {
    /// Resolve a raw row into a typed rule
    pub fn from_row(row: &MappingRow) -> Result<Self> {
        Ok(Self {
            group: row.group.clone(),
            source_field: row.source_field.trim().to_string(),
            source_type: SourceType::parse(&row.source_type),
            target_node: row.target_node.trim().to_string(),
            target_type: ScalarType::parse(&row.target_type),
            path: MappingPath::parse(&row.path)?,
        })
    }

    /// Whether this rule's source type is a collection marker
    pub fn is_collection(&self) -> bool {
        self.source_type.is_collection()
    }
}

/// Resolve a batch of raw rows into rules
///
/// Rows with an empty source field are dropped here, mirroring the reader
/// contract: such rows are placeholders in the mapping table, not rules.
pub fn rules_from_rows(rows: &[MappingRow]) -> Result<Vec<MappingRule>> {
    rows.iter()
        .filter(|row| !row.source_field.trim().is_empty())
        .map(MappingRule::from_row)
        .collect()
}
