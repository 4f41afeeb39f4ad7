//! Configuration schema
//!
//! A schema is a tree of [`SchemaNode`]s. It can be built in code with the
//! typed constructors below, or parsed from a plain JSON literal using the
//! `$default` / `$aliases` / `$type` markers (see [`parser`]).

pub mod error;
pub mod parser;

use serde_json::Value;

use crate::convert::TypeConverter;

pub use error::SchemaError;

/// One node of a configuration schema
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Unit of resolution: default, aliases and conversion
    Leaf(ConfigurationLeaf),
    /// Named children in declaration order
    Object(Vec<(String, SchemaNode)>),
    /// Elements of a list that is not purely atomic
    Array(Vec<SchemaNode>),
    /// Bare literal, resolved like a leaf whose default is the literal
    Scalar(Value),
}

impl SchemaNode {
    /// Start an object node
    pub fn object() -> ObjectBuilder {
        ObjectBuilder::default()
    }

    pub fn array(items: impl IntoIterator<Item = SchemaNode>) -> Self {
        SchemaNode::Array(items.into_iter().collect())
    }

    pub fn scalar(value: impl Into<Value>) -> Self {
        SchemaNode::Scalar(value.into())
    }

    /// Parse a JSON literal schema, see [`parser`]
    pub fn from_literal(literal: &Value) -> Result<Self, SchemaError> {
        parser::parse(literal)
    }
}

impl From<ConfigurationLeaf> for SchemaNode {
    fn from(leaf: ConfigurationLeaf) -> Self {
        SchemaNode::Leaf(leaf)
    }
}

impl From<ObjectBuilder> for SchemaNode {
    fn from(builder: ObjectBuilder) -> Self {
        builder.build()
    }
}

/// Fluent builder for [`SchemaNode::Object`]
#[derive(Debug, Default)]
pub struct ObjectBuilder {
    fields: Vec<(String, SchemaNode)>,
}

impl ObjectBuilder {
    /// Append a child; fields resolve in the order they are added
    pub fn field(mut self, name: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
        self.fields.push((name.into(), node.into()));
        self
    }

    pub fn build(self) -> SchemaNode {
        SchemaNode::Object(self.fields)
    }
}

/// How a leaf turns its raw value into a typed one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    Explicit(TypeConverter),
    /// Legacy mode: inferred from the shape of the default
    Inferred,
}

/// Leaf resolved against the environment
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationLeaf {
    /// `None` makes the leaf required
    pub default: Option<Value>,
    /// Candidate names probed before the canonical key, in order
    pub aliases: Vec<String>,
    pub conversion: Conversion,
}

impl ConfigurationLeaf {
    /// Leaf with an explicit converter
    pub fn typed(converter: TypeConverter) -> Self {
        Self {
            default: None,
            aliases: Vec::new(),
            conversion: Conversion::Explicit(converter),
        }
    }

    /// Leaf whose conversion is inferred from its default
    pub fn inferred() -> Self {
        Self {
            default: None,
            aliases: Vec::new(),
            conversion: Conversion::Inferred,
        }
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.aliases.push(name.into());
        self
    }

    pub fn aliases<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// Ordered candidates: declared aliases, then the canonical key
    pub fn alias_chain(&self, canonical: &str) -> Vec<String> {
        let mut chain = self.aliases.clone();
        chain.push(canonical.to_string());
        chain
    }

    pub(crate) fn from_scalar(value: &Value) -> Self {
        Self::inferred().default_value(value.clone())
    }
}
