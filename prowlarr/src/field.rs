//! Field specifications and typed field values
//!
//! Every concrete resource is described by a table of [`FieldSpec`]s. The
//! table drives the wire codec, the Terraform schema and state conversion,
//! so adding an implementation means adding a table, not code.

use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use tfplug::types::Dynamic;

/// What the server sends in place of a stored secret
pub const SENSITIVE_MASK: &str = "********";

/// Value kind a field is coerced to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// Coerces like a string, never logged
    Sensitive,
    Int,
    Bool,
    IntSet,
    StringSet,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String | FieldKind::Sensitive => "string",
            FieldKind::Int => "integer",
            FieldKind::Bool => "boolean",
            FieldKind::IntSet => "set of integers",
            FieldKind::StringSet => "set of strings",
        }
    }
}

/// Whether a zero value is still sent on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitPolicy {
    Always,
    OmitWhenZero,
}

/// Enumeration a value must belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allowed {
    Any,
    Ints(&'static [i64]),
    Strings(&'static [&'static str]),
}

/// One row of an implementation's field table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Terraform attribute name
    pub attribute: &'static str,
    /// Name used on the wire
    pub wire: &'static str,
    pub kind: FieldKind,
    pub emit: EmitPolicy,
    pub allowed: Allowed,
    pub required: bool,
    pub description: &'static str,
}

impl FieldSpec {
    pub const fn new(
        attribute: &'static str,
        wire: &'static str,
        kind: FieldKind,
        description: &'static str,
    ) -> Self {
        Self {
            attribute,
            wire,
            kind,
            emit: EmitPolicy::Always,
            allowed: Allowed::Any,
            required: false,
            description,
        }
    }

    pub const fn string(attribute: &'static str, wire: &'static str, description: &'static str) -> Self {
        Self::new(attribute, wire, FieldKind::String, description)
    }

    pub const fn sensitive(attribute: &'static str, wire: &'static str, description: &'static str) -> Self {
        Self::new(attribute, wire, FieldKind::Sensitive, description)
    }

    pub const fn int(attribute: &'static str, wire: &'static str, description: &'static str) -> Self {
        Self::new(attribute, wire, FieldKind::Int, description)
    }

    pub const fn bool(attribute: &'static str, wire: &'static str, description: &'static str) -> Self {
        Self::new(attribute, wire, FieldKind::Bool, description)
    }

    pub const fn int_set(attribute: &'static str, wire: &'static str, description: &'static str) -> Self {
        Self::new(attribute, wire, FieldKind::IntSet, description)
    }

    pub const fn string_set(attribute: &'static str, wire: &'static str, description: &'static str) -> Self {
        Self::new(attribute, wire, FieldKind::StringSet, description)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn omit_when_zero(mut self) -> Self {
        self.emit = EmitPolicy::OmitWhenZero;
        self
    }

    pub const fn one_of_ints(mut self, allowed: &'static [i64]) -> Self {
        self.allowed = Allowed::Ints(allowed);
        self
    }

    pub const fn one_of_strings(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = Allowed::Strings(allowed);
        self
    }

    pub fn is_sensitive(&self) -> bool {
        self.kind == FieldKind::Sensitive
    }

    /// True when `value` satisfies the declared enumeration
    pub fn permits(&self, value: &FieldValue) -> bool {
        match (self.allowed, value) {
            (Allowed::Any, _) => true,
            (Allowed::Ints(allowed), FieldValue::Int(n)) => allowed.contains(n),
            (Allowed::Strings(allowed), FieldValue::String(s)) => allowed.contains(&s.as_str()),
            _ => false,
        }
    }

    pub fn allowed_display(&self) -> String {
        match self.allowed {
            Allowed::Any => "any value".to_string(),
            Allowed::Ints(allowed) => format!("{:?}", allowed),
            Allowed::Strings(allowed) => format!("{:?}", allowed),
        }
    }
}

/// A field value after coercion to its declared kind
#[derive(Clone, PartialEq, Eq)]
pub enum FieldValue {
    String(String),
    Sensitive(String),
    Int(i64),
    Bool(bool),
    IntSet(BTreeSet<i64>),
    StringSet(BTreeSet<String>),
}

impl FieldValue {
    /// Value an absent or null field decodes to
    pub fn zero(kind: FieldKind) -> Self {
        match kind {
            FieldKind::String => FieldValue::String(String::new()),
            FieldKind::Sensitive => FieldValue::Sensitive(String::new()),
            FieldKind::Int => FieldValue::Int(0),
            FieldKind::Bool => FieldValue::Bool(false),
            FieldKind::IntSet => FieldValue::IntSet(BTreeSet::new()),
            FieldKind::StringSet => FieldValue::StringSet(BTreeSet::new()),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::String(_) => FieldKind::String,
            FieldValue::Sensitive(_) => FieldKind::Sensitive,
            FieldValue::Int(_) => FieldKind::Int,
            FieldValue::Bool(_) => FieldKind::Bool,
            FieldValue::IntSet(_) => FieldKind::IntSet,
            FieldValue::StringSet(_) => FieldKind::StringSet,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == FieldValue::zero(self.kind())
    }

    /// Wire representation; sets come out sorted
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::String(s) | FieldValue::Sensitive(s) => Value::String(s.clone()),
            FieldValue::Int(n) => Value::from(*n),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::IntSet(set) => Value::Array(set.iter().map(|n| Value::from(*n)).collect()),
            FieldValue::StringSet(set) => {
                Value::Array(set.iter().map(|s| Value::String(s.clone())).collect())
            }
        }
    }

    /// State representation
    pub fn to_dynamic(&self) -> Dynamic {
        match self {
            FieldValue::String(s) | FieldValue::Sensitive(s) => Dynamic::String(s.clone()),
            FieldValue::Int(n) => Dynamic::Number(*n as f64),
            FieldValue::Bool(b) => Dynamic::Bool(*b),
            FieldValue::IntSet(set) => {
                Dynamic::List(set.iter().map(|n| Dynamic::Number(*n as f64)).collect())
            }
            FieldValue::StringSet(set) => {
                Dynamic::List(set.iter().map(|s| Dynamic::String(s.clone())).collect())
            }
        }
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Sensitive(_) => f.write_str("Sensitive(<redacted>)"),
            FieldValue::String(s) => f.debug_tuple("String").field(s).finish(),
            FieldValue::Int(n) => f.debug_tuple("Int").field(n).finish(),
            FieldValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            FieldValue::IntSet(set) => f.debug_tuple("IntSet").field(set).finish(),
            FieldValue::StringSet(set) => f.debug_tuple("StringSet").field(set).finish(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Sensitive(_) => f.write_str("<redacted>"),
            FieldValue::String(s) => write!(f, "{:?}", s),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::IntSet(set) => write!(f, "{:?}", set),
            FieldValue::StringSet(set) => write!(f, "{:?}", set),
        }
    }
}
