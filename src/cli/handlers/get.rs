//! Get command handler

use std::io::Write;

use serde_json::Value;

use super::write_json;
use crate::config::Settings;
use crate::convert::TypeConverter;
use crate::engine::{InferencePolicy, Resolver};
use crate::env::EnvStore;
use crate::error::AppResult;

/// Handler for the get command
#[derive(Debug)]
pub struct GetCommandHandler {
    policy: InferencePolicy,
}

impl GetCommandHandler {
    pub fn new(settings: &Settings) -> Self {
        Self {
            policy: settings.resolver.policy,
        }
    }

    /// Resolve a single variable and write its value as JSON
    ///
    /// Writes `null` when the variable is unset, not required and has no
    /// default.
    pub fn execute(
        &self,
        key: &str,
        converter: Option<&TypeConverter>,
        default: Option<&str>,
        required: bool,
        env: &dyn EnvStore,
        out: &mut dyn Write,
    ) -> AppResult<()> {
        let mut resolver = Resolver::new(env).policy(self.policy);

        let value = if required {
            resolver.resolve_or_die(key, converter)?
        } else {
            let default = default.map(parse_default);
            resolver.resolve_one(key, default, converter)?.unwrap_or(Value::Null)
        };

        write_json(out, &value, false)
    }
}

/// Defaults are read as JSON so `80` and `[1,2]` drive inference; anything
/// else is taken as a plain string
fn parse_default(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
