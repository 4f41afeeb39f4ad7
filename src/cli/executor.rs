//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use std::io::Write;

use super::handlers::{GetCommandHandler, KeysCommandHandler, ResolveCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::env::EnvStore;
use crate::error::AppResult;

/// Execute a CLI command with the given settings
///
/// # Arguments
/// * `cli` - Parsed CLI arguments
/// * `settings` - Merged and validated settings
/// * `env` - Variables to resolve against
/// * `out` - Destination of the command output
///
/// # Errors
/// Returns errors from command handlers
pub fn execute_command(
    cli: &Cli,
    settings: &Settings,
    env: &dyn EnvStore,
    out: &mut dyn Write,
) -> AppResult<()> {
    match &cli.command {
        Commands::Resolve {
            schema,
            pretty,
            events,
            ..
        } => ResolveCommandHandler::new(settings).execute(schema, env, *pretty, *events, out),
        Commands::Keys { schema, json, .. } => {
            KeysCommandHandler::new(settings).execute(schema, *json, out)
        }
        Commands::Get {
            key,
            converter,
            default,
            required,
        } => GetCommandHandler::new(settings).execute(
            key,
            converter.as_ref(),
            default.as_deref(),
            *required,
            env,
            out,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ConfigurationMerger;
    use crate::engine::ResolveError;
    use crate::error::AppError;
    use clap::Parser;
    use std::collections::HashMap;
    use tempfile::NamedTempFile;

    fn execute(args: &[&str], vars: &[(&str, &str)]) -> AppResult<String> {
        let cli = Cli::try_parse_from(args).unwrap();
        let settings = ConfigurationMerger::new(Settings::default())
            .merge_cli_args(&cli)
            .unwrap();
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let mut out = Vec::new();
        execute_command(&cli, &settings, &env, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn schema(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_execute_resolve() {
        let file = schema(r#"{"a": {"b": "x"}}"#);
        let path = file.path().to_str().unwrap();

        let output = execute(&["envtree", "resolve", path], &[("A_B", "y")]).unwrap();
        assert_eq!(output, "{\"a\":{\"b\":\"y\"}}\n");
    }

    #[test]
    fn test_execute_resolve_missing_lists_chain() {
        let file = schema(r#"{"a": {"b": {"$aliases": ["LEGACY_B"], "$type": "String"}}}"#);
        let path = file.path().to_str().unwrap();

        let err = execute(&["envtree", "resolve", path], &[]).unwrap_err();
        match err {
            AppError::Resolve(err @ ResolveError::MissingRequiredVariableWithAliases { .. }) => {
                assert_eq!(err.attempted_keys(), ["LEGACY_B", "A_B"]);
            }
            other => panic!("Expected missing variable error, got {other:?}"),
        }
    }

    #[test]
    fn test_execute_keys() {
        let file = schema(r#"{"a": {"b": "x"}}"#);
        let path = file.path().to_str().unwrap();

        let output = execute(&["envtree", "keys", path, "--prefix", "APP_"], &[]).unwrap();
        assert!(output.starts_with("a.b\tAPP_A_B\t"));
    }

    #[test]
    fn test_execute_get() {
        let output = execute(
            &["envtree", "get", "DEBUG", "--type", "Boolean"],
            &[("DEBUG", "yes")],
        );
        assert!(matches!(
            output,
            Err(AppError::Resolve(ResolveError::Conversion { .. }))
        ));

        let output = execute(
            &["envtree", "get", "DEBUG", "--type", "Boolean"],
            &[("DEBUG", "True")],
        )
        .unwrap();
        assert_eq!(output, "true\n");
    }
}
