//! Legacy type inference from the shape of a default value
//!
//! Precedence, first match wins:
//! 1. a raw value spelling `true`/`false` (any case) is a boolean,
//!    whatever the default looks like
//! 2. a default that is a list of atoms infers `Array<T>`, `T` inferred
//!    from the first element
//! 3. a numeric default infers `Integer`, even for a non-integral default
//! 4. anything else passes the raw string through

use std::fmt;

use serde_json::Value;

use super::{ARRAY_SEPARATOR, ConversionError, TypeConverter, parse_boolean};

/// Conversion picked for a leaf that declares no explicit converter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inference {
    Integer,
    Identity,
    Array(Box<Inference>),
}

impl Inference {
    /// Infer the conversion from the declared default, if any
    pub fn from_default(default: Option<&Value>) -> Self {
        match default {
            Some(Value::Array(items)) if is_atomic_list(items) => {
                Inference::Array(Box::new(Self::from_default(items.first())))
            }
            // Non-integral numeric defaults still select Integer
            Some(Value::Number(_)) => Inference::Integer,
            _ => Inference::Identity,
        }
    }

    pub fn convert(&self, raw: &str) -> Result<Value, ConversionError> {
        if let Some(flag) = parse_boolean(raw) {
            return Ok(Value::Bool(flag));
        }

        match self {
            Inference::Integer => TypeConverter::Integer.convert(Some(raw)),
            Inference::Identity => Ok(Value::String(raw.to_string())),
            Inference::Array(inner) => raw
                .split(ARRAY_SEPARATOR)
                .enumerate()
                .map(|(index, token)| {
                    inner
                        .convert(token)
                        .map_err(|e| ConversionError::element(index, e))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
        }
    }
}

impl fmt::Display for Inference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inference::Integer => f.write_str("Integer"),
            Inference::Identity => f.write_str("Identity"),
            Inference::Array(inner) => write!(f, "Array<{inner}>"),
        }
    }
}

/// String, number or boolean
pub fn is_atom(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

/// A list made only of atoms; the empty list counts
pub fn is_atomic_list(items: &[Value]) -> bool {
    items.iter().all(is_atom)
}
