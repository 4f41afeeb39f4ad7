//! Type conversion of raw environment strings
//!
//! Explicit converters form a closed set (`Integer`, `Boolean`, `String`,
//! `Array<T>`). Leaves that declare none fall back to the legacy inference
//! in [`infer`], which picks a conversion from the shape of the default.

pub mod error;
pub mod infer;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use error::ConversionError;
pub use infer::Inference;

/// Separator between the elements of an array value
pub const ARRAY_SEPARATOR: char = ',';

/// Explicit converter declared on a configuration leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeConverter {
    /// Base-10 whole number
    Integer,
    /// Case-insensitive `true` / `false`
    Boolean,
    /// Identity, only fails when the value is absent
    String,
    /// Comma separated list, each token converted with the inner converter
    Array(Box<TypeConverter>),
}

impl TypeConverter {
    /// Shorthand for `Array<inner>`
    pub fn array(inner: TypeConverter) -> Self {
        TypeConverter::Array(Box::new(inner))
    }

    /// Convert a raw environment value
    ///
    /// `None` means the variable was not present at all, which every
    /// converter rejects. An empty string is a present value.
    pub fn convert(&self, raw: Option<&str>) -> Result<Value, ConversionError> {
        let Some(raw) = raw else {
            return Err(ConversionError::absent(self.to_string()));
        };

        match self {
            TypeConverter::Integer => raw
                .parse::<i64>()
                .map(Value::from)
                .map_err(|e| ConversionError::invalid(self.to_string(), raw, e.to_string())),
            TypeConverter::Boolean => parse_boolean(raw).map(Value::Bool).ok_or_else(|| {
                ConversionError::invalid(self.to_string(), raw, "expected 'true' or 'false'")
            }),
            TypeConverter::String => Ok(Value::String(raw.to_string())),
            TypeConverter::Array(inner) => raw
                .split(ARRAY_SEPARATOR)
                .enumerate()
                .map(|(index, token)| {
                    inner
                        .convert(Some(token))
                        .map_err(|e| ConversionError::element(index, e))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
        }
    }
}

/// Case-insensitive match against the boolean literals
pub(crate) fn parse_boolean(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

impl fmt::Display for TypeConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeConverter::Integer => f.write_str("Integer"),
            TypeConverter::Boolean => f.write_str("Boolean"),
            TypeConverter::String => f.write_str("String"),
            TypeConverter::Array(inner) => write!(f, "Array<{inner}>"),
        }
    }
}

impl FromStr for TypeConverter {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        match name {
            "Integer" => Ok(TypeConverter::Integer),
            "Boolean" => Ok(TypeConverter::Boolean),
            "String" => Ok(TypeConverter::String),
            _ => name
                .strip_prefix("Array<")
                .and_then(|rest| rest.strip_suffix('>'))
                .ok_or_else(|| ConversionError::UnknownConverter(name.to_string()))
                .and_then(|inner| inner.parse().map(TypeConverter::array)),
        }
    }
}

impl TryFrom<String> for TypeConverter {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeConverter> for String {
    fn from(value: TypeConverter) -> Self {
        value.to_string()
    }
}
