//! Concrete resource record, the only model Terraform state ever sees

use std::collections::{BTreeMap, BTreeSet};
use tfplug::types::{AttributePath, Dynamic, DynamicValue};

use crate::codec::FieldValues;
use crate::error::ProviderError;
use crate::field::{FieldKind, FieldSpec, FieldValue};

/// Envelope members and implementation fields flattened together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// Zero until the server has assigned one
    pub id: i64,
    pub name: String,
    pub tags: BTreeSet<i64>,
    pub values: FieldValues,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with(mut self, attribute: &'static str, value: FieldValue) -> Self {
        self.values.insert(attribute, value);
        self
    }

    pub fn value(&self, attribute: &str) -> Option<&FieldValue> {
        self.values.get(attribute)
    }

    /// Build a record from plan or state. Null and unknown values stay out
    /// of `values`: the user did not set them, so nothing is sent for them.
    pub fn from_state<'a>(
        state: &DynamicValue,
        specs: impl IntoIterator<Item = &'a FieldSpec>,
    ) -> Result<Self, ProviderError> {
        let id = match state.get(&AttributePath::new("id")) {
            Ok(Dynamic::Number(_)) => state.get_i64(&AttributePath::new("id"))?,
            _ => 0,
        };

        let name = match state.get(&AttributePath::new("name")) {
            Ok(Dynamic::String(name)) => name.clone(),
            _ => String::new(),
        };

        let tags = match state.get(&AttributePath::new("tags")) {
            Ok(Dynamic::List(items)) => items
                .iter()
                .map(|item| dynamic_to_int("tags", item))
                .collect::<Result<BTreeSet<_>, _>>()?,
            _ => BTreeSet::new(),
        };

        let mut values = BTreeMap::new();
        for spec in specs {
            match state.get(&AttributePath::new(spec.attribute)) {
                Ok(Dynamic::Null) | Ok(Dynamic::Unknown) | Err(_) => {}
                Ok(value) => {
                    values.insert(spec.attribute, from_dynamic(spec, value)?);
                }
            }
        }

        Ok(Self {
            id,
            name,
            tags,
            values,
        })
    }

    /// Render the record as state. Every attribute is set, zero values
    /// included, so nothing is left unknown after apply.
    pub fn to_state<'a>(
        &self,
        specs: impl IntoIterator<Item = &'a FieldSpec>,
    ) -> Result<DynamicValue, ProviderError> {
        let mut state = DynamicValue::object();

        state.set_i64(&AttributePath::new("id"), self.id)?;
        state.set_string(&AttributePath::new("name"), self.name.clone())?;
        state.set_list(
            &AttributePath::new("tags"),
            self.tags.iter().map(|t| Dynamic::Number(*t as f64)).collect(),
        )?;

        for spec in specs {
            let value = self
                .values
                .get(spec.attribute)
                .cloned()
                .unwrap_or_else(|| FieldValue::zero(spec.kind));
            set_attribute(&mut state, spec.attribute, value.to_dynamic())?;
        }

        Ok(state)
    }

    /// Attribute names whose values differ between the two records. An
    /// unset value matches the zero value, which is what state shows for it.
    pub fn diff(&self, other: &Record) -> Vec<String> {
        let mut changed = Vec::new();

        if self.id != other.id {
            changed.push("id".to_string());
        }
        if self.name != other.name {
            changed.push("name".to_string());
        }
        if self.tags != other.tags {
            changed.push("tags".to_string());
        }

        let attributes: BTreeSet<&&'static str> =
            self.values.keys().chain(other.values.keys()).collect();
        for attribute in attributes {
            let same = match (self.values.get(*attribute), other.values.get(*attribute)) {
                (Some(a), Some(b)) => a == b,
                (Some(value), None) | (None, Some(value)) => value.is_zero(),
                (None, None) => true,
            };
            if !same {
                changed.push(attribute.to_string());
            }
        }

        changed
    }
}

fn set_attribute(state: &mut DynamicValue, attribute: &str, value: Dynamic) -> tfplug::Result<()> {
    let path = AttributePath::new(attribute);
    match value {
        Dynamic::String(s) => state.set_string(&path, s),
        Dynamic::Number(n) => state.set_number(&path, n),
        Dynamic::Bool(b) => state.set_bool(&path, b),
        Dynamic::List(items) => state.set_list(&path, items),
        other => Err(tfplug::TfplugError::InvalidState(format!(
            "cannot store {} at {}",
            other.type_name(),
            path
        ))),
    }
}

fn from_dynamic(spec: &FieldSpec, value: &Dynamic) -> Result<FieldValue, ProviderError> {
    let mismatch = || {
        ProviderError::InvalidState(format!(
            "{} must be a {}, found {}",
            spec.attribute,
            spec.kind.as_str(),
            value.type_name()
        ))
    };

    match (spec.kind, value) {
        (FieldKind::String, Dynamic::String(s)) => Ok(FieldValue::String(s.clone())),
        (FieldKind::Sensitive, Dynamic::String(s)) => Ok(FieldValue::Sensitive(s.clone())),
        (FieldKind::Bool, Dynamic::Bool(b)) => Ok(FieldValue::Bool(*b)),
        (FieldKind::Int, value @ Dynamic::Number(_)) => {
            Ok(FieldValue::Int(dynamic_to_int(spec.attribute, value)?))
        }
        (FieldKind::IntSet, Dynamic::List(items)) => items
            .iter()
            .map(|item| dynamic_to_int(spec.attribute, item))
            .collect::<Result<BTreeSet<_>, _>>()
            .map(FieldValue::IntSet),
        (FieldKind::StringSet, Dynamic::List(items)) => items
            .iter()
            .map(|item| match item {
                Dynamic::String(s) => Ok(s.clone()),
                _ => Err(mismatch()),
            })
            .collect::<Result<BTreeSet<_>, _>>()
            .map(FieldValue::StringSet),
        _ => Err(mismatch()),
    }
}

fn dynamic_to_int(attribute: &str, value: &Dynamic) -> Result<i64, ProviderError> {
    match value {
        Dynamic::Number(n) if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n < i64::MAX as f64 => {
            Ok(*n as i64)
        }
        other => Err(ProviderError::InvalidState(format!(
            "{} must hold whole numbers, found {}",
            attribute,
            match other {
                Dynamic::Number(n) => n.to_string(),
                other => other.type_name().to_string(),
            }
        ))),
    }
}
