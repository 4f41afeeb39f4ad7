//! Command handlers for CLI operations
//!
//! Handlers read from an [`EnvStore`](crate::env::EnvStore) and write to a
//! caller-supplied writer so they can run against fixed environments.

pub mod get;
pub mod keys;
pub mod resolve;

pub use get::GetCommandHandler;
pub use keys::KeysCommandHandler;
pub use resolve::ResolveCommandHandler;

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::schema::SchemaNode;

/// Read and parse a JSON schema literal
pub(crate) fn load_schema(path: &Path) -> AppResult<SchemaNode> {
    let content =
        std::fs::read_to_string(path).map_err(|e| AppError::schema_file(path, e))?;
    let literal: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| AppError::schema_file(path, e))?;

    tracing::debug!(path = %path.display(), "Schema file loaded");
    Ok(SchemaNode::from_literal(&literal)?)
}

pub(crate) fn write_json<T: Serialize>(
    out: &mut dyn Write,
    value: &T,
    pretty: bool,
) -> AppResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
