//! Structural field access for arbitrary source objects
//!
//! The tree builder never assumes a fixed shape for its input beyond "has a
//! field with this name". That contract is expressed by the [`Resolvable`]
//! trait; concrete source types satisfy it either through a per-type
//! [`FieldTable`] (an explicit accessor registry built once per entity type,
//! no runtime introspection) or, for JSON input, through the blanket
//! implementation on [`serde_json::Value`] where field access is key lookup.

use serde_json::Value;
use std::collections::HashMap;

use crate::error::{Error, Result};

/// The value of one resolved field
pub enum FieldValue<'a> {
    /// The field exists but holds no value; the builder skips the subtree.
    Absent,
    /// A scalar (string, number, or boolean) ready for type coercion
    Scalar(Value),
    /// A nested object the builder may recurse into
    Object(&'a dyn Resolvable),
    /// An ordered collection; each element expands into its own sibling
    Collection(Vec<FieldValue<'a>>),
}

impl<'a> FieldValue<'a> {
    /// Scalar from anything serde_json can represent as a scalar
    pub fn scalar(value: impl Into<Value>) -> Self {
        Self::Scalar(value.into())
    }

    /// Object reference, or `Absent` for `None`
    pub fn object<T: Resolvable>(object: Option<&'a T>) -> Self {
        match object {
            Some(o) => Self::Object(o),
            None => Self::Absent,
        }
    }

    /// Collection of nested objects, or `Absent` for `None`
    pub fn objects<T: Resolvable>(items: Option<&'a [T]>) -> Self {
        match items {
            Some(items) => {
                Self::Collection(items.iter().map(|i| FieldValue::Object(i as _)).collect())
            }
            None => Self::Absent,
        }
    }

    /// Collection of scalar elements, or `Absent` for `None`
    pub fn scalars<T: Clone + Into<Value>>(items: Option<&[T]>) -> Self {
        match items {
            Some(items) => Self::Collection(
                items
                    .iter()
                    .map(|i| FieldValue::Scalar(i.clone().into()))
                    .collect(),
            ),
            None => Self::Absent,
        }
    }
}

impl std::fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absent => write!(f, "Absent"),
            Self::Scalar(v) => f.debug_tuple("Scalar").field(v).finish(),
            Self::Object(o) => f.debug_tuple("Object").field(&o.type_name()).finish(),
            Self::Collection(items) => f.debug_tuple("Collection").field(&items.len()).finish(),
        }
    }
}

impl<'a> From<&str> for FieldValue<'a> {
    fn from(value: &str) -> Self {
        Self::Scalar(Value::from(value))
    }
}

impl<'a> From<i64> for FieldValue<'a> {
    fn from(value: i64) -> Self {
        Self::Scalar(Value::from(value))
    }
}

impl<'a> From<f64> for FieldValue<'a> {
    fn from(value: f64) -> Self {
        Self::Scalar(Value::from(value))
    }
}

impl<'a> From<bool> for FieldValue<'a> {
    fn from(value: bool) -> Self {
        Self::Scalar(Value::from(value))
    }
}

/// Field access by name on an otherwise opaque source object
///
/// A miss is [`Error::FieldNotFound`] and is fatal for the whole build: a
/// rule naming a field the type does not have means the mapping table and
/// the data model have drifted apart.
pub trait Resolvable {
    /// Type name used in diagnostics
    fn type_name(&self) -> &str;

    /// Resolve the named field's current value
    fn field(&self, name: &str) -> Result<FieldValue<'_>>;
}

/// Typed getter registered in a [`FieldTable`]
pub type Accessor<T> = for<'a> fn(&'a T) -> FieldValue<'a>;

/// Per-entity accessor table: a mapping from field name to a typed getter,
/// built once per entity type
///
/// # Example
///
/// ```
/// use std::sync::LazyLock;
/// use fieldcast_core::resolve::{FieldTable, FieldValue, Resolvable};
/// use fieldcast_core::Result;
///
/// struct Campaign {
///     id: String,
///     status: Option<String>,
/// }
///
/// static FIELDS: LazyLock<FieldTable<Campaign>> = LazyLock::new(|| {
///     FieldTable::new("Campaign")
///         .field("id", |c: &Campaign| FieldValue::from(c.id.as_str()))
///         .field("status", |c: &Campaign| match &c.status {
///             Some(s) => FieldValue::from(s.as_str()),
///             None => FieldValue::Absent,
///         })
/// });
///
/// impl Resolvable for Campaign {
///     fn type_name(&self) -> &str {
///         FIELDS.type_name()
///     }
///     fn field(&self, name: &str) -> Result<FieldValue<'_>> {
///         FIELDS.resolve(self, name)
///     }
/// }
/// ```
pub struct FieldTable<T> {
    type_name: &'static str,
    fields: HashMap<&'static str, Accessor<T>>,
}

impl<T> FieldTable<T> {
    /// Create an empty table for the named entity type
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: HashMap::new(),
        }
    }

    /// Register an accessor for one field
    pub fn field(mut self, name: &'static str, accessor: Accessor<T>) -> Self {
        self.fields.insert(name, accessor);
        self
    }

    /// The entity type name this table describes
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Look up and invoke the accessor for `name`
    pub fn resolve<'a>(&self, object: &'a T, name: &str) -> Result<FieldValue<'a>> {
        match self.fields.get(name) {
            Some(accessor) => Ok(accessor(object)),
            None => Err(Error::field_not_found(self.type_name, name)),
        }
    }
}

/// Classify a borrowed JSON value into a [`FieldValue`]
fn classify(value: &Value) -> FieldValue<'_> {
    match value {
        Value::Null => FieldValue::Absent,
        Value::Object(_) => FieldValue::Object(value),
        Value::Array(items) => FieldValue::Collection(items.iter().map(classify).collect()),
        scalar => FieldValue::Scalar(scalar.clone()),
    }
}

/// JSON objects are source graphs in their own right: a field is a key, a
/// null is an absent value, an array is a collection.
impl Resolvable for Value {
    fn type_name(&self) -> &str {
        match self {
            Value::Object(_) => "json object",
            Value::Array(_) => "json array",
            _ => "json value",
        }
    }

    fn field(&self, name: &str) -> Result<FieldValue<'_>> {
        let map = self
            .as_object()
            .ok_or_else(|| Error::field_not_found(self.type_name(), name))?;
        match map.get(name) {
            Some(value) => Ok(classify(value)),
            None => Err(Error::field_not_found(self.type_name(), name)),
        }
    }
}
