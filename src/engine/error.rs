//! Resolution error types

use thiserror::Error;

use crate::convert::ConversionError;
use crate::schema::SchemaError;

/// Resolution error types
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Required leaf without aliases was not set
    #[error("Missing required environment variable: {key}")]
    MissingRequiredVariable { key: String },

    /// Required leaf with aliases: none of its candidates was set
    #[error("Missing required environment variable, set one of: {}", chain.join(", "))]
    MissingRequiredVariableWithAliases {
        /// Every candidate in probe order, canonical key last
        chain: Vec<String>,
    },

    /// Malformed schema
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A variable was set but its value does not fit the converter
    #[error("Invalid value for environment variable {key}")]
    Conversion {
        key: String,
        #[source]
        source: ConversionError,
    },

    /// An observer refused an event
    #[error("Observer failed on {key}")]
    Observer {
        key: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ResolveError {
    pub fn missing<S: Into<String>>(key: S) -> Self {
        ResolveError::MissingRequiredVariable { key: key.into() }
    }

    pub fn missing_with_aliases(chain: Vec<String>) -> Self {
        ResolveError::MissingRequiredVariableWithAliases { chain }
    }

    /// Whether the error comes from the deployment environment rather
    /// than from the schema or an observer
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            ResolveError::MissingRequiredVariable { .. }
                | ResolveError::MissingRequiredVariableWithAliases { .. }
        )
    }

    /// Every variable name the operator may set to fix a missing value
    pub fn attempted_keys(&self) -> Vec<&str> {
        match self {
            ResolveError::MissingRequiredVariable { key } => vec![key.as_str()],
            ResolveError::MissingRequiredVariableWithAliases { chain } => {
                chain.iter().map(String::as_str).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Type alias for Result with ResolveError
pub type ResolveResult<T> = Result<T, ResolveError>;
