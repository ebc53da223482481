//! Mapping-driven tree builder
//!
//! The central algorithm: walks the mapping table against a root object and
//! produces an output tree whose shape is dictated entirely by the
//! slash-delimited paths of the rules. Scalar conversion is delegated to the
//! coercion engine, field access to the field resolver.
//!
//! The traversal is a single depth-first pass. For a given node and path
//! prefix, scalar and nested-object rules are applied first; rules carrying
//! a collection marker are expanded afterwards, one sibling subtree per
//! source element, in source iteration order.

use crate::convert::convert;
use crate::error::{Error, Result};
use crate::resolve::{FieldValue, Resolvable};
use crate::tree::{Document, Element};
use crate::types::{ElementKind, MappingRule, ScalarType, SourceType};

/// Build an output tree from a mapping table and a root object.
///
/// The document root is named after the shared first path segment of the
/// rules. Fails with [`Error::Mapping`] before any construction if the
/// table is empty or the rules disagree on the root.
pub fn build(rules: &[MappingRule], root_object: &dyn Resolvable) -> Result<Document> {
    let root_name = validate_rules(rules)?.to_string();
    tracing::debug!(root = %root_name, rules = rules.len(), "building output tree");

    let mut root = Element::container(&root_name);
    let prefix = vec![root_name];
    populate(&mut root, &prefix, root_object, rules)?;
    Ok(Document::new(root))
}

/// Check table-level invariants and return the document root name.
///
/// Runs before any tree construction; also usable on its own to vet a
/// mapping table without building.
pub fn validate_rules(rules: &[MappingRule]) -> Result<&str> {
    let first = rules
        .first()
        .ok_or_else(|| Error::mapping("no mapping rules provided"))?;
    let root = first.path.root();
    for rule in rules {
        if rule.path.root() != root {
            return Err(Error::mapping(format!(
                "inconsistent root path: expected '{}', found '{}' in rule for field '{}'",
                root,
                rule.path.root(),
                rule.source_field
            )));
        }
    }
    Ok(root)
}

/// Whether a rule is relevant at this prefix: its path extends the prefix
/// and there is a non-empty relative path left to consume.
fn selects(rule: &MappingRule, prefix: &[String]) -> bool {
    rule.path.len() > prefix.len() && rule.path.starts_with(prefix)
}

/// Whether any rule directly introduces `path` as a collection container.
fn introduces_collection(rules: &[MappingRule], path: &[String]) -> bool {
    rules
        .iter()
        .any(|r| r.is_collection() && r.path.segments() == path)
}

/// Apply every rule relevant under `prefix` to `object`, growing `node`.
fn populate(
    node: &mut Element,
    prefix: &[String],
    object: &dyn Resolvable,
    rules: &[MappingRule],
) -> Result<()> {
    for rule in rules.iter().filter(|r| selects(r, prefix)) {
        if !rule.is_collection() {
            apply_scalar_rule(node, prefix, object, rule, rules)?;
        }
    }
    for rule in rules.iter().filter(|r| selects(r, prefix)) {
        if rule.is_collection() {
            expand_collection(node, prefix, object, rule, rules)?;
        }
    }
    Ok(())
}

/// Walk one scalar rule's relative path, creating intermediate object nodes
/// and finally a leaf holding the coerced value.
///
/// Absent values anywhere along the path terminate the branch silently:
/// sparse output, never an error. A segment that some rule introduces as a
/// collection is left alone here; the leaf will be emitted while that
/// collection's elements are expanded.
fn apply_scalar_rule(
    node: &mut Element,
    prefix: &[String],
    object: &dyn Resolvable,
    rule: &MappingRule,
    rules: &[MappingRule],
) -> Result<()> {
    let SourceType::Scalar(source_type) = rule.source_type else {
        return Ok(());
    };
    let segments = rule.path.segments();
    let mut current = node;
    let mut owner = object;

    for index in prefix.len()..segments.len() {
        let segment = &segments[index];
        if index == segments.len() - 1 {
            match owner.field(&rule.source_field)? {
                FieldValue::Absent => {}
                FieldValue::Scalar(value) => {
                    if let Some(text) = convert(&value, source_type, rule.target_type)? {
                        // empty text suppresses node creation
                        if !text.is_empty() {
                            current.push_child(Element::leaf(&rule.target_node, text));
                        }
                    }
                }
                FieldValue::Object(_) | FieldValue::Collection(_) => {
                    return Err(Error::conversion(
                        format!("<field '{}'>", rule.source_field),
                        rule.source_type.to_string(),
                        rule.target_type.to_string(),
                        "expected a scalar value",
                    ));
                }
            }
        } else if introduces_collection(rules, &segments[..=index]) {
            break;
        } else {
            match owner.field(segment)? {
                FieldValue::Absent => break,
                FieldValue::Object(next) => {
                    current = current.ensure_child(segment);
                    owner = next;
                }
                other => {
                    // a transit segment no rule introduced turned out not to
                    // be an object; the branch is dropped, not repeated
                    tracing::warn!(
                        segment = %segment,
                        path = %rule.path,
                        value = ?other,
                        "transit segment did not resolve to an object, dropping branch"
                    );
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Expand one collection rule: resolve the collection field and emit one
/// sibling subtree per element under a shared container node.
///
/// An absent collection emits nothing at all, including the container.
fn expand_collection(
    node: &mut Element,
    prefix: &[String],
    object: &dyn Resolvable,
    rule: &MappingRule,
    rules: &[MappingRule],
) -> Result<()> {
    let segments = rule.path.segments();
    let mut current = node;
    let mut owner = object;

    // walk transit segments up to the container segment
    for index in prefix.len()..segments.len() - 1 {
        if introduces_collection(rules, &segments[..=index]) {
            // nested under another collection; expanded per element there
            return Ok(());
        }
        let segment = &segments[index];
        match owner.field(segment)? {
            FieldValue::Absent => return Ok(()),
            FieldValue::Object(next) => {
                current = current.ensure_child(segment);
                owner = next;
            }
            other => {
                tracing::warn!(
                    segment = %segment,
                    path = %rule.path,
                    value = ?other,
                    "transit segment did not resolve to an object, dropping branch"
                );
                return Ok(());
            }
        }
    }

    let elements = match owner.field(&rule.source_field)? {
        FieldValue::Absent => return Ok(()),
        FieldValue::Collection(elements) => elements,
        FieldValue::Object(_) | FieldValue::Scalar(_) => {
            return Err(Error::conversion(
                format!("<field '{}'>", rule.source_field),
                rule.source_type.to_string(),
                rule.target_type.to_string(),
                "expected a collection",
            ));
        }
    };

    let container_name = segments.last().expect("validated non-empty path");
    let container = current.ensure_child(container_name);
    let element_name = singularize(&rule.target_node);

    // rules scoped to a single element see the container path plus the
    // element segment as their prefix
    let mut element_prefix: Vec<String> = segments.to_vec();
    element_prefix.push(element_name.clone());

    for element in &elements {
        match element {
            FieldValue::Object(nested) => {
                let mut child = Element::container(element_name.clone());
                populate(&mut child, &element_prefix, *nested, rules)?;
                container.push_child(child);
            }
            FieldValue::Scalar(value) => {
                let element_type = match rule.source_type {
                    SourceType::Collection(ElementKind::Scalar(s)) => s,
                    _ => ScalarType::String,
                };
                if let Some(text) = convert(value, element_type, rule.target_type)? {
                    if !text.is_empty() {
                        container.push_child(Element::leaf(element_name.clone(), text));
                    }
                }
            }
            FieldValue::Absent => {}
            FieldValue::Collection(_) => {
                tracing::warn!(
                    path = %rule.path,
                    "collection element is itself a collection, skipping"
                );
            }
        }
    }
    Ok(())
}

/// Strip the collection decoration from a container name to get the element
/// node name: `branches` -> `branch`, `technologies` -> `technology`.
fn singularize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        format!("{}y", stem)
    } else if name.len() > 1 && name.ends_with('s') && !name.ends_with("ss") {
        name[..name.len() - 1].to_string()
    } else {
        name.to_string()
    }
}
