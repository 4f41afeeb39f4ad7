//! Key listing without touching the environment

use serde::Serialize;
use serde_json::Value;

use super::walk::{LeafSite, walk};
use crate::convert::Inference;
use crate::naming::KeyPrefix;
use crate::schema::{Conversion, SchemaError, SchemaNode};

/// What one leaf of a schema will look up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyReport {
    /// Dotted schema path
    pub path: String,
    /// Candidates in probe order, canonical key last
    pub chain: Vec<String>,
    pub required: bool,
    /// Converter name; inferred conversions are prefixed with `~`
    pub conversion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl KeyReport {
    pub fn canonical_key(&self) -> &str {
        self.chain.last().map_or("", String::as_str)
    }
}

/// List every leaf of `schema` in traversal order
pub fn explain(schema: &SchemaNode, prefix: &KeyPrefix) -> Result<Vec<KeyReport>, SchemaError> {
    let mut reports = Vec::new();
    walk(schema, prefix, &mut |site: LeafSite<'_>| -> Result<Value, SchemaError> {
        let conversion = match &site.leaf.conversion {
            Conversion::Explicit(converter) => converter.to_string(),
            Conversion::Inferred => {
                format!("~{}", Inference::from_default(site.leaf.default.as_ref()))
            }
        };
        reports.push(KeyReport {
            path: site.path.to_string(),
            chain: site.leaf.alias_chain(site.key),
            required: site.leaf.is_required(),
            conversion,
            default: site.leaf.default.clone(),
        });
        Ok(Value::Null)
    })?;
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_explain_lists_chains() {
        let schema = SchemaNode::from_literal(&json!({
            "amqp": {"port": 5672},
            "a": {"b": [{"c": {"$aliases": ["C_ALIAS"], "$type": "Boolean"}}]},
            "list": ["x", "y"]
        }))
        .unwrap();

        let reports = explain(&schema, &KeyPrefix::root()).unwrap();
        assert_eq!(reports.len(), 3);

        assert_eq!(reports[0].path, "amqp.port");
        assert_eq!(reports[0].chain, ["AMQP_PORT"]);
        assert_eq!(reports[0].conversion, "~Integer");
        assert!(!reports[0].required);

        assert_eq!(reports[1].path, "a.b[0].c");
        assert_eq!(reports[1].chain, ["C_ALIAS", "A_B[0]_C"]);
        assert_eq!(reports[1].canonical_key(), "A_B[0]_C");
        assert_eq!(reports[1].conversion, "Boolean");
        assert!(reports[1].required);

        assert_eq!(reports[2].conversion, "~Array<Identity>");
    }
}
