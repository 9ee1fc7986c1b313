//! Parameter maps shared by the wrapper and its estimators
//!
//! Estimators expose their configuration as a flat, string-keyed [`Params`]
//! map. The wrapper merges its own keys into the same map so that a single
//! `get_params` / `set_params` pair configures the whole stack.

use crate::error::{ArbokError, Result};
use crate::preprocessing::Preprocessor;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Ordered parameter map
pub type Params = BTreeMap<String, ParamValue>;

/// A single parameter value
#[derive(Debug, Clone)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<ParamValue>),
    /// An optional preprocessor carried as a parameter of the wrapper
    Preprocessor(Option<Box<dyn Preprocessor>>),
}

impl ParamValue {
    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Null => "null",
            ParamValue::Bool(_) => "bool",
            ParamValue::Int(_) => "int",
            ParamValue::Float(_) => "float",
            ParamValue::Str(_) => "string",
            ParamValue::List(_) => "list",
            ParamValue::Preprocessor(_) => "preprocessor",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Floats, with integers widened
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(f) => Some(*f),
            ParamValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for ParamValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ParamValue::Null, ParamValue::Null) => true,
            (ParamValue::Bool(a), ParamValue::Bool(b)) => a == b,
            (ParamValue::Int(a), ParamValue::Int(b)) => a == b,
            (ParamValue::Float(a), ParamValue::Float(b)) => a == b,
            (ParamValue::Str(a), ParamValue::Str(b)) => a == b,
            (ParamValue::List(a), ParamValue::List(b)) => a == b,
            // Preprocessors compare by name; fitted state is not part of identity
            (ParamValue::Preprocessor(a), ParamValue::Preprocessor(b)) => match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => a.name() == b.name(),
                _ => false,
            },
            _ => false,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Null => write!(f, "null"),
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::Str(s) => write!(f, "{:?}", s),
            ParamValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            ParamValue::Preprocessor(None) => write!(f, "null"),
            ParamValue::Preprocessor(Some(p)) => write!(f, "<{}>", p.name()),
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ParamValue::Null | ParamValue::Preprocessor(None) => serializer.serialize_none(),
            ParamValue::Bool(b) => serializer.serialize_bool(*b),
            ParamValue::Int(i) => serializer.serialize_i64(*i),
            ParamValue::Float(x) => serializer.serialize_f64(*x),
            ParamValue::Str(s) => serializer.serialize_str(s),
            ParamValue::List(items) => items.serialize(serializer),
            ParamValue::Preprocessor(Some(p)) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("preprocessor", p.name())?;
                map.end()
            }
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl From<Option<Box<dyn Preprocessor>>> for ParamValue {
    fn from(v: Option<Box<dyn Preprocessor>>) -> Self {
        ParamValue::Preprocessor(v)
    }
}

/// Build a [`InvalidParameter`](ArbokError::InvalidParameter) error for a
/// value of the wrong kind.
pub fn type_mismatch(name: &str, value: &ParamValue, expected: &str) -> ArbokError {
    ArbokError::InvalidParameter {
        name: name.to_string(),
        value: value.to_string(),
        reason: format!("expected {}, got {}", expected, value.kind()),
    }
}

/// Remove `name` from `params` and read it as a boolean.
pub fn take_bool(params: &mut Params, name: &str) -> Result<Option<bool>> {
    match params.remove(name) {
        None => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| type_mismatch(name, &value, "bool")),
    }
}

/// Remove `name` from `params` and read it as an integer in `u32` range.
pub fn take_u32(params: &mut Params, name: &str) -> Result<Option<u32>> {
    match params.remove(name) {
        None => Ok(None),
        Some(value) => match value.as_int().and_then(|i| u32::try_from(i).ok()) {
            Some(v) => Ok(Some(v)),
            None => Err(type_mismatch(name, &value, "int in 0..=4294967295")),
        },
    }
}
