use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::engine::ResolveError;
use crate::logger::LoggerError;
use crate::schema::SchemaError;

/// Error type of the `envtree` binary
///
/// Wraps the library errors with enough context to be printed verbatim
/// to whoever configures the environment.
#[derive(Error, Debug)]
pub enum AppError {
    /// The tool's own settings are invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The logger could not be installed
    #[error(transparent)]
    Logger(#[from] LoggerError),

    /// Schema file could not be read or is not valid JSON
    #[error("Cannot read schema file {}", path.display())]
    SchemaFile {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// Schema literal is malformed
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Resolution failed
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Writing command output failed
    #[error("Failed to write output")]
    Output {
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    pub fn schema_file(path: impl Into<PathBuf>, source: impl Into<anyhow::Error>) -> Self {
        AppError::SchemaFile {
            path: path.into(),
            source: source.into(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(source: std::io::Error) -> Self {
        AppError::Output { source }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Output {
            source: error.into(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
