//! Schema authoring errors

use thiserror::Error;

/// Malformed schema, a programming mistake rather than a deployment one
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Schema error at '{path}': {reason}")]
pub struct SchemaError {
    /// Dotted schema path, e.g. `a.b[1].c`
    pub path: String,
    pub reason: String,
}

impl SchemaError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
