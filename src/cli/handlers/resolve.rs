//! Resolve command handler

use std::io::Write;
use std::path::Path;

use super::{load_schema, write_json};
use crate::config::{ResolverSettings, Settings};
use crate::engine::Resolver;
use crate::env::EnvStore;
use crate::error::AppResult;
use crate::events::LoggingObserver;
use crate::naming::KeyPrefix;

/// Handler for the resolve command
#[derive(Debug)]
pub struct ResolveCommandHandler {
    settings: ResolverSettings,
}

impl ResolveCommandHandler {
    pub fn new(settings: &Settings) -> Self {
        Self {
            settings: settings.resolver.clone(),
        }
    }

    /// Resolve the schema at `schema_path` against `env` and write the
    /// configuration tree as JSON
    ///
    /// Nothing is written when resolution fails.
    pub fn execute(
        &self,
        schema_path: &Path,
        env: &dyn EnvStore,
        pretty: bool,
        events: bool,
        out: &mut dyn Write,
    ) -> AppResult<()> {
        let schema = load_schema(schema_path)?;

        let mut resolver = Resolver::new(env).policy(self.settings.policy);
        if events {
            resolver.subscribe(LoggingObserver);
        }

        let prefix = KeyPrefix::new(self.settings.prefix.clone());
        let resolved = resolver.resolve_all_with_prefix(&schema, &prefix)?;

        tracing::debug!(schema = %schema_path.display(), "Schema resolved");
        write_json(out, &resolved, pretty)
    }
}
