//! Schema traversal shared by resolution and key listing
//!
//! Object fields are visited in declaration order and array elements by
//! index. The output tree mirrors the schema with every leaf replaced by
//! what the visitor returned for it. The first visitor error aborts the
//! walk and the partial tree is dropped.

use serde_json::{Map, Value};

use crate::naming::KeyPrefix;
use crate::schema::{ConfigurationLeaf, SchemaError, SchemaNode};

/// Leaf reached by the walk
pub(crate) struct LeafSite<'a> {
    pub leaf: &'a ConfigurationLeaf,
    /// Canonical key derived from the path
    pub key: &'a str,
    /// Dotted schema path, used in diagnostics
    pub path: &'a str,
}

pub(crate) fn walk<E, F>(schema: &SchemaNode, prefix: &KeyPrefix, visit: &mut F) -> Result<Value, E>
where
    E: From<SchemaError>,
    F: FnMut(LeafSite<'_>) -> Result<Value, E>,
{
    match schema {
        SchemaNode::Object(fields) => walk_object(fields, prefix, "", visit),
        _ => Err(SchemaError::new("<root>", "schema root must be an object node").into()),
    }
}

fn walk_object<E, F>(
    fields: &[(String, SchemaNode)],
    prefix: &KeyPrefix,
    path: &str,
    visit: &mut F,
) -> Result<Value, E>
where
    E: From<SchemaError>,
    F: FnMut(LeafSite<'_>) -> Result<Value, E>,
{
    let mut resolved = Map::with_capacity(fields.len());
    for (name, node) in fields {
        let child_path = if path.is_empty() {
            name.clone()
        } else {
            format!("{path}.{name}")
        };
        let value = walk_child(
            node,
            &prefix.derive_key(name),
            prefix.nest(name),
            &child_path,
            visit,
        )?;
        resolved.insert(name.clone(), value);
    }
    Ok(Value::Object(resolved))
}

/// Leaves and arrays read from `key`; objects descend under `nested`
fn walk_child<E, F>(
    node: &SchemaNode,
    key: &str,
    nested: KeyPrefix,
    path: &str,
    visit: &mut F,
) -> Result<Value, E>
where
    E: From<SchemaError>,
    F: FnMut(LeafSite<'_>) -> Result<Value, E>,
{
    match node {
        SchemaNode::Leaf(leaf) => visit(LeafSite { leaf, key, path }),
        SchemaNode::Scalar(literal) => {
            let leaf = ConfigurationLeaf::from_scalar(literal);
            visit(LeafSite {
                leaf: &leaf,
                key,
                path,
            })
        }
        SchemaNode::Object(fields) => walk_object(fields, &nested, path, visit),
        SchemaNode::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                walk_child(
                    item,
                    &KeyPrefix::element_key(key, index),
                    KeyPrefix::derive_array_key(key, index),
                    &format!("{path}[{index}]"),
                    visit,
                )
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(literal: Value) -> Vec<String> {
        let schema = SchemaNode::from_literal(&literal).unwrap();
        let mut keys = Vec::new();
        walk(&schema, &KeyPrefix::root(), &mut |site: LeafSite<'_>| -> Result<Value, SchemaError> {
            keys.push(site.key.to_string());
            Ok(Value::Null)
        })
        .unwrap();
        keys
    }

    #[test]
    fn test_object_elements_nest_under_indexed_prefix() {
        assert_eq!(
            keys(json!({"plop": {"api": [{"a": 1}, {"b": {"c": 2}}]}})),
            ["PLOP_API[0]_A", "PLOP_API[1]_B_C"]
        );
    }

    #[test]
    fn test_nested_arrays_use_element_keys() {
        assert_eq!(
            keys(json!({"m": [[{"x": 1}], "s"]})),
            ["M[0][0]_X", "M[1]"]
        );
    }
}
