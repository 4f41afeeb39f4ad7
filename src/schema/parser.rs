//! Parser for JSON literal schemas
//!
//! Classification of each value, first match wins:
//! 1. a mapping carrying `$default`, `$aliases` or `$type` is a leaf
//! 2. any other mapping is a nested object
//! 3. a list holding mappings or lists is an array node
//! 4. everything else, atomic lists included, is a scalar

use serde_json::{Map, Value};

use super::{ConfigurationLeaf, Conversion, SchemaError, SchemaNode};
use crate::convert::infer::is_atomic_list;
use crate::convert::TypeConverter;

pub const DEFAULT_MARKER: &str = "$default";
pub const ALIASES_MARKER: &str = "$aliases";
pub const TYPE_MARKER: &str = "$type";

const MARKERS: [&str; 3] = [DEFAULT_MARKER, ALIASES_MARKER, TYPE_MARKER];

/// Parse a schema literal; the root must be a mapping
pub fn parse(literal: &Value) -> Result<SchemaNode, SchemaError> {
    match literal {
        Value::Object(map) if !is_leaf(map) => parse_object("", map),
        _ => Err(SchemaError::new(
            "<root>",
            "schema root must be a mapping of configuration fields",
        )),
    }
}

fn parse_node(path: &str, value: &Value) -> Result<SchemaNode, SchemaError> {
    match value {
        Value::Object(map) if is_leaf(map) => parse_leaf(path, map).map(SchemaNode::Leaf),
        Value::Object(map) => parse_object(path, map),
        Value::Array(items) if !is_atomic_list(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| parse_node(&format!("{path}[{index}]"), item))
            .collect::<Result<Vec<_>, _>>()
            .map(SchemaNode::Array),
        other => Ok(SchemaNode::Scalar(other.clone())),
    }
}

fn parse_object(path: &str, map: &Map<String, Value>) -> Result<SchemaNode, SchemaError> {
    map.iter()
        .map(|(name, value)| {
            let child_path = if path.is_empty() {
                name.clone()
            } else {
                format!("{path}.{name}")
            };
            parse_node(&child_path, value).map(|node| (name.clone(), node))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(SchemaNode::Object)
}

fn is_leaf(map: &Map<String, Value>) -> bool {
    MARKERS.iter().any(|marker| map.contains_key(*marker))
}

fn parse_leaf(path: &str, map: &Map<String, Value>) -> Result<ConfigurationLeaf, SchemaError> {
    let conversion = match map.get(TYPE_MARKER) {
        None => Conversion::Inferred,
        Some(Value::String(name)) => name
            .parse::<TypeConverter>()
            .map(Conversion::Explicit)
            .map_err(|e| SchemaError::new(path, e.to_string()))?,
        Some(other) => {
            return Err(SchemaError::new(
                path,
                format!("{TYPE_MARKER} must be a converter name, got {other}"),
            ));
        }
    };

    let aliases = match map.get(ALIASES_MARKER) {
        None if matches!(conversion, Conversion::Explicit(_)) => Vec::new(),
        None => {
            return Err(SchemaError::new(
                path,
                format!("{ALIASES_MARKER} must be defined along side {DEFAULT_MARKER}"),
            ));
        }
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(name) => Ok(name.clone()),
                other => Err(SchemaError::new(
                    path,
                    format!("{ALIASES_MARKER} entries must be variable names, got {other}"),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(SchemaError::new(
                path,
                format!("{ALIASES_MARKER} must be a list of variable names, got {other}"),
            ));
        }
    };

    for key in map.keys().filter(|key| !MARKERS.contains(&key.as_str())) {
        tracing::warn!(path, field = %key, "Ignoring unknown field on configuration leaf");
    }

    Ok(ConfigurationLeaf {
        default: map.get(DEFAULT_MARKER).cloned(),
        aliases,
        conversion,
    })
}
