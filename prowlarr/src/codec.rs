//! Field codec: typed values <-> the dynamic `{name, value}` wire list
//!
//! Decoding is strict. Absent or null entries become the zero value of
//! their kind, anything else must coerce cleanly to the declared kind or the
//! whole decode fails. Encoding follows table order so request bodies are
//! stable between runs, and only carries values that were actually set.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::api::Field;
use crate::field::{EmitPolicy, FieldKind, FieldSpec, FieldValue};

/// Typed values keyed by Terraform attribute name
pub type FieldValues = BTreeMap<&'static str, FieldValue>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("field {field}: expected {expected}, got {actual}")]
    FieldTypeMismatch {
        field: String,
        expected: &'static str,
        actual: String,
    },

    #[error("field {field}: value {value} is not one of {allowed}")]
    FieldValidation {
        field: String,
        value: String,
        allowed: String,
    },
}

/// Decode a wire field list against `specs`. Entries the table does not
/// know are ignored.
pub fn decode(fields: &[Field], specs: &[FieldSpec]) -> Result<FieldValues, CodecError> {
    let mut values = FieldValues::new();

    for spec in specs {
        let raw = fields.iter().find(|f| f.name == spec.wire).map(|f| &f.value);
        values.insert(spec.attribute, decode_value(spec, raw)?);
    }

    Ok(values)
}

/// Decode envelope members that live directly on the wire object
pub fn decode_object(object: &Map<String, Value>, specs: &[FieldSpec]) -> Result<FieldValues, CodecError> {
    let mut values = FieldValues::new();

    for spec in specs {
        values.insert(spec.attribute, decode_value(spec, object.get(spec.wire))?);
    }

    Ok(values)
}

/// Encode typed values into a wire field list in table order. Attributes
/// absent from `values` are unset and left out; zero values that are
/// present are sent unless the spec omits them.
pub fn encode(values: &FieldValues, specs: &[FieldSpec]) -> Result<Vec<Field>, CodecError> {
    let mut fields = Vec::with_capacity(specs.len());

    for spec in specs {
        if let Some(value) = encode_value(spec, values.get(spec.attribute))? {
            fields.push(Field::new(spec.wire, value));
        }
    }

    Ok(fields)
}

/// Encode envelope members into the wire object
pub fn encode_object(
    values: &FieldValues,
    specs: &[FieldSpec],
    object: &mut Map<String, Value>,
) -> Result<(), CodecError> {
    for spec in specs {
        if let Some(value) = encode_value(spec, values.get(spec.attribute))? {
            object.insert(spec.wire.to_string(), value);
        }
    }

    Ok(())
}

fn decode_value(spec: &FieldSpec, raw: Option<&Value>) -> Result<FieldValue, CodecError> {
    let raw = match raw {
        None | Some(Value::Null) => return Ok(FieldValue::zero(spec.kind)),
        Some(raw) => raw,
    };

    let value = match spec.kind {
        FieldKind::String => FieldValue::String(coerce_string(spec, raw)?),
        FieldKind::Sensitive => FieldValue::Sensitive(coerce_string(spec, raw)?),
        FieldKind::Int => FieldValue::Int(coerce_int(spec, raw)?),
        FieldKind::Bool => match raw {
            Value::Bool(b) => FieldValue::Bool(*b),
            other => return Err(mismatch(spec, other)),
        },
        FieldKind::IntSet => {
            let items = coerce_array(spec, raw)?;
            let set = items
                .iter()
                .map(|item| coerce_int(spec, item))
                .collect::<Result<BTreeSet<_>, _>>()?;
            FieldValue::IntSet(set)
        }
        FieldKind::StringSet => {
            let items = coerce_array(spec, raw)?;
            let set = items
                .iter()
                .map(|item| coerce_string(spec, item))
                .collect::<Result<BTreeSet<_>, _>>()?;
            FieldValue::StringSet(set)
        }
    };

    check_allowed(spec, &value)?;
    Ok(value)
}

fn encode_value(spec: &FieldSpec, value: Option<&FieldValue>) -> Result<Option<Value>, CodecError> {
    let Some(value) = value else {
        return Ok(None);
    };

    if value.kind() != spec.kind {
        return Err(CodecError::FieldTypeMismatch {
            field: spec.wire.to_string(),
            expected: spec.kind.as_str(),
            actual: value.kind().as_str().to_string(),
        });
    }

    if spec.emit == EmitPolicy::OmitWhenZero && value.is_zero() {
        return Ok(None);
    }

    check_allowed(spec, value)?;
    Ok(Some(value.to_json()))
}

fn check_allowed(spec: &FieldSpec, value: &FieldValue) -> Result<(), CodecError> {
    if spec.permits(value) {
        return Ok(());
    }

    Err(CodecError::FieldValidation {
        field: spec.wire.to_string(),
        value: value.to_string(),
        allowed: spec.allowed_display(),
    })
}

fn coerce_string(spec: &FieldSpec, raw: &Value) -> Result<String, CodecError> {
    match raw {
        Value::String(s) => Ok(s.clone()),
        other => Err(mismatch(spec, other)),
    }
}

fn coerce_int(spec: &FieldSpec, raw: &Value) -> Result<i64, CodecError> {
    match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            // 9091.0 is still a port
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(f as i64)
                }
                _ => Err(mismatch(spec, raw)),
            }
        }
        other => Err(mismatch(spec, other)),
    }
}

fn coerce_array<'v>(spec: &FieldSpec, raw: &'v Value) -> Result<&'v Vec<Value>, CodecError> {
    match raw {
        Value::Array(items) => Ok(items),
        other => Err(mismatch(spec, other)),
    }
}

fn mismatch(spec: &FieldSpec, actual: &Value) -> CodecError {
    let actual = if spec.is_sensitive() {
        json_type_name(actual).to_string()
    } else {
        format!("{} {}", json_type_name(actual), actual)
    };

    CodecError::FieldTypeMismatch {
        field: spec.wire.to_string(),
        expected: spec.kind.as_str(),
        actual,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
