//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::validation::{parse_converter, validate_file_path, validate_key, validate_prefix};
use crate::convert::TypeConverter;

/// Resolve configuration schemas against environment variables
#[derive(Parser, Debug)]
#[command(name = "envtree")]
#[command(about = "Resolve configuration schemas against environment variables")]
#[command(long_about = "
envtree reads a JSON configuration schema, derives one environment variable
name per leaf (`a.b.c` -> `A_B_C`, `api[0].a` -> `API[0]_A`), and prints the
resolved configuration as JSON. Leaves may declare `$default`, `$aliases`
and `$type`; a leaf without a default that no variable satisfies is fatal.

EXAMPLES:
    # Resolve a schema against the current environment
    envtree resolve schema.json

    # Show which variables a schema reads
    envtree keys schema.json

    # Require every leaf to declare a $type
    envtree resolve --strict schema.json

    # Read a single variable as a list of integers
    envtree get PORTS --type 'Array<Integer>' --default '[80]'
")]
#[command(version = crate::build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// TOML file with `[logger]` and `[resolver]` sections. Values can
    /// also be set through `ENVTREE_*` variables, e.g.
    /// `ENVTREE_LOGGER__LEVEL=debug`.
    #[arg(short, long, value_name = "FILE", value_parser = validate_file_path)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    ///
    /// Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    ///
    /// Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a schema and print the configuration as JSON
    ///
    /// Exits with status 1 and lists every acceptable variable name when a
    /// required value is missing.
    Resolve {
        /// JSON schema file
        #[arg(value_name = "SCHEMA", value_parser = validate_file_path)]
        schema: PathBuf,

        /// Reject leaves that do not declare a $type
        #[arg(long)]
        strict: bool,

        /// Prefix prepended to every derived variable name
        #[arg(long, value_parser = validate_prefix)]
        prefix: Option<String>,

        /// Pretty-print the resolved configuration
        #[arg(long)]
        pretty: bool,

        /// Log every found and defaulted variable
        #[arg(long)]
        events: bool,
    },

    /// List the variables a schema reads, canonical name last
    Keys {
        /// JSON schema file
        #[arg(value_name = "SCHEMA", value_parser = validate_file_path)]
        schema: PathBuf,

        /// Prefix prepended to every derived variable name
        #[arg(long, value_parser = validate_prefix)]
        prefix: Option<String>,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read a single variable
    Get {
        /// Variable name
        #[arg(value_parser = validate_key)]
        key: String,

        /// Converter: Integer, Boolean, String or Array<T>
        #[arg(long = "type", value_name = "CONVERTER", value_parser = parse_converter)]
        converter: Option<TypeConverter>,

        /// Default value, parsed as JSON when possible
        #[arg(long, conflicts_with = "required")]
        default: Option<String>,

        /// Fail when the variable is not set
        #[arg(long)]
        required: bool,
    },
}

impl Cli {
    /// Requested log level override, if any
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_resolve() {
        let schema = NamedTempFile::new().unwrap();
        let path = schema.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["envtree", "resolve", path, "--strict", "--prefix", "APP_"])
            .unwrap();
        match cli.command {
            Commands::Resolve {
                schema,
                strict,
                prefix,
                pretty,
                events,
            } => {
                assert_eq!(schema, PathBuf::from(path));
                assert!(strict);
                assert_eq!(prefix.as_deref(), Some("APP_"));
                assert!(!pretty);
                assert!(!events);
            }
            other => panic!("Expected resolve command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_get_with_type() {
        let cli = Cli::try_parse_from(["envtree", "get", "PORTS", "--type", "Array<Integer>"])
            .unwrap();
        match cli.command {
            Commands::Get { key, converter, .. } => {
                assert_eq!(key, "PORTS");
                assert_eq!(converter, Some(TypeConverter::array(TypeConverter::Integer)));
            }
            other => panic!("Expected get command, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_schema_file_is_rejected() {
        assert!(Cli::try_parse_from(["envtree", "resolve", "/no/such/schema.json"]).is_err());
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["envtree", "-v", "-q", "get", "A"]).is_err());
    }

    #[test]
    fn test_default_and_required_conflict() {
        assert!(
            Cli::try_parse_from(["envtree", "get", "A", "--default", "1", "--required"]).is_err()
        );
    }

    #[test]
    fn test_log_level_override() {
        let cli = Cli::try_parse_from(["envtree", "--verbose", "get", "A"]).unwrap();
        assert_eq!(cli.log_level_override(), Some("debug"));

        let cli = Cli::try_parse_from(["envtree", "-q", "get", "A"]).unwrap();
        assert_eq!(cli.log_level_override(), Some("error"));

        let cli = Cli::try_parse_from(["envtree", "get", "A"]).unwrap();
        assert_eq!(cli.log_level_override(), None);
    }

    #[test]
    fn test_unknown_converter_is_rejected() {
        assert!(Cli::try_parse_from(["envtree", "get", "A", "--type", "Float"]).is_err());
    }
}
