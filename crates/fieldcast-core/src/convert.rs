//! Type coercion engine
//!
//! Converts a scalar value plus a declared source-type tag into the textual
//! rendering of a declared target type. Coercion is two-stage: the value is
//! first parsed into the semantic type named by the source tag, then
//! re-rendered per the target tag's formatting rules.
//!
//! Boolean parsing accepts case-insensitive `true`/`false` and maps anything
//! else to `false`. That quirk is part of the documented contract and is
//! preserved here rather than tightened.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::ScalarType;

/// A scalar value carried in its declared semantic type between the parse
/// and format stages.
#[derive(Debug, Clone, PartialEq)]
enum TypedValue {
    Text(String),
    Int(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
}

impl TypedValue {
    fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Double(d) => d.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

/// Convert a scalar value from its source type to the textual rendering of
/// the target type.
///
/// Returns `Ok(None)` for absent (`null`) values: absence propagates to the
/// caller as "skip this field", it is not an error. Any parse failure yields
/// [`Error::Conversion`] carrying the original value and both type tags.
pub fn convert(value: &Value, source: ScalarType, target: ScalarType) -> Result<Option<String>> {
    if value.is_null() {
        return Ok(None);
    }
    let typed = parse_value(value, source, target)?;
    let text = format_value(&typed, target).map_err(|message| {
        Error::conversion(
            render_raw(value),
            source.to_string(),
            target.to_string(),
            message,
        )
    })?;
    Ok(Some(text))
}

/// Textual rendering of a raw JSON scalar, used for diagnostics and as the
/// input to string-based parses.
fn render_raw(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Stage one: coerce the raw value into the semantic type named by the
/// source tag.
fn parse_value(value: &Value, source: ScalarType, target: ScalarType) -> Result<TypedValue> {
    let fail = |message: &str| {
        Error::conversion(
            render_raw(value),
            source.to_string(),
            target.to_string(),
            message,
        )
    };
    let typed = match source {
        ScalarType::String => TypedValue::Text(render_raw(value)),
        ScalarType::Integer => match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    TypedValue::Int(i)
                } else if let Some(f) = n.as_f64() {
                    // integer coercion truncates toward zero
                    TypedValue::Int(f.trunc() as i64)
                } else {
                    return Err(fail("number out of integer range"));
                }
            }
            other => TypedValue::Int(
                render_raw(other)
                    .parse::<i64>()
                    .map_err(|_| fail("not a valid integer"))?,
            ),
        },
        ScalarType::Float => match value {
            Value::Number(n) => TypedValue::Float(n.as_f64().unwrap_or(f64::NAN) as f32),
            other => TypedValue::Float(
                render_raw(other)
                    .parse::<f32>()
                    .map_err(|_| fail("not a valid float"))?,
            ),
        },
        ScalarType::Double => match value {
            Value::Number(n) => TypedValue::Double(n.as_f64().unwrap_or(f64::NAN)),
            other => TypedValue::Double(
                render_raw(other)
                    .parse::<f64>()
                    .map_err(|_| fail("not a valid double"))?,
            ),
        },
        ScalarType::Boolean => match value {
            Value::Bool(b) => TypedValue::Bool(*b),
            other => TypedValue::Bool(parse_bool_lenient(&render_raw(other))),
        },
    };
    Ok(typed)
}

/// Stage two: render the typed value per the target tag's formatting rules.
///
/// Errors are returned as bare messages; the caller wraps them with the
/// offending value and both tags.
fn format_value(typed: &TypedValue, target: ScalarType) -> std::result::Result<String, String> {
    let text = match target {
        ScalarType::String => typed.render(),
        ScalarType::Integer => match typed {
            TypedValue::Int(i) => i.to_string(),
            TypedValue::Float(f) => (f.trunc() as i64).to_string(),
            TypedValue::Double(d) => (d.trunc() as i64).to_string(),
            TypedValue::Text(s) => s
                .parse::<i64>()
                .map_err(|_| "not a valid integer".to_string())?
                .to_string(),
            TypedValue::Bool(_) => return Err("cannot render boolean as integer".to_string()),
        },
        ScalarType::Float => match typed {
            TypedValue::Int(i) => (*i as f32).to_string(),
            TypedValue::Float(f) => f.to_string(),
            TypedValue::Double(d) => (*d as f32).to_string(),
            TypedValue::Text(s) => s
                .parse::<f32>()
                .map_err(|_| "not a valid float".to_string())?
                .to_string(),
            TypedValue::Bool(_) => return Err("cannot render boolean as float".to_string()),
        },
        ScalarType::Double => match typed {
            TypedValue::Int(i) => (*i as f64).to_string(),
            TypedValue::Float(f) => (*f as f64).to_string(),
            TypedValue::Double(d) => d.to_string(),
            TypedValue::Text(s) => s
                .parse::<f64>()
                .map_err(|_| "not a valid double".to_string())?
                .to_string(),
            TypedValue::Bool(_) => return Err("cannot render boolean as double".to_string()),
        },
        ScalarType::Boolean => match typed {
            TypedValue::Bool(b) => b.to_string(),
            // lenient parse: anything that is not "true" renders as false
            other => parse_bool_lenient(&other.render()).to_string(),
        },
    };
    Ok(text)
}

/// Case-insensitive `"true"` is true; everything else is false.
fn parse_bool_lenient(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("true")
}
