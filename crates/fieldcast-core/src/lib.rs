//! Fieldcast Core - mapping-driven projection of object graphs to XML
//!
//! This crate converts an in-memory object graph into a hierarchical XML
//! document, where the correspondence between source fields and output nodes
//! is supplied as an external table of path-based mapping rules rather than
//! hard-coded.
//!
//! # Main Components
//!
//! - **Mapping table** ([`types`]): declarative rules binding a source field
//!   to an output node at a slash-delimited tree path
//! - **Field resolver** ([`resolve`]): structural field access by name, via
//!   per-entity accessor tables or JSON key lookup
//! - **Type coercion engine** ([`convert`]): scalar conversion between
//!   declared source and target types
//! - **Tree builder** ([`builder`]): the path-prefix-driven traversal that
//!   produces the output tree
//! - **XML printer** ([`writer`]): indented text rendering with a UTF-8
//!   declaration
//!
//! # Example
//!
//! ```
//! use fieldcast_core::{build_xml, loader};
//! use serde_json::json;
//!
//! fn example() -> fieldcast_core::Result<()> {
//!     let rules = loader::load_mappings_from_value(json!([
//!         {
//!             "group": "Company",
//!             "source_field": "name",
//!             "source_type": "string",
//!             "target_node": "name",
//!             "target_type": "string",
//!             "path": "company/name"
//!         }
//!     ]))?;
//!     let data = json!({"name": "Global Enterprises"});
//!     let xml = build_xml(&rules, &data)?;
//!     assert!(xml.contains("<name>Global Enterprises</name>"));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod builder;
pub mod convert;
pub mod error;
pub mod loader;
pub mod resolve;
pub mod tree;
pub mod types;
pub mod writer;

// Re-export main types for convenience
pub use builder::{build, validate_rules};
pub use convert::convert;
pub use error::{Error, Result};
pub use resolve::{Accessor, FieldTable, FieldValue, Resolvable};
pub use tree::{Document, Element};
pub use types::{
    rules_from_rows, ElementKind, MappingPath, MappingRow, MappingRule, ScalarType, SourceType,
};
pub use writer::{WriterConfig, XmlWriter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the output tree and render it as XML with default printer settings
///
/// This is the composed entry point: tree builder plus printer. The whole
/// operation either returns a complete document or fails; there is no
/// partial-success mode.
pub fn build_xml(rules: &[MappingRule], root_object: &dyn Resolvable) -> Result<String> {
    let document = builder::build(rules, root_object)?;
    Ok(XmlWriter::default().write(&document))
}
