//! Configuration merger for CLI arguments and config files
//!
//! CLI flags override values from the configuration file and from
//! `ENVTREE_*` variables.

use std::path::Path;

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};
use crate::engine::InferencePolicy;

/// Applies CLI argument overrides on top of loaded settings
#[derive(Debug)]
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base configuration from `config_path`, or from
    /// `ENVTREE_CONFIG_FILE` when no path is given
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading or validation fails
    pub fn from_config_path(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let loader = config_path.map_or_else(ConfigLoader::new, ConfigLoader::with_file);
        Ok(Self::new(loader.load()?))
    }

    /// Merge CLI arguments into the base configuration and validate the result
    pub fn merge_cli_args(self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config;

        if let Some(level) = cli.log_level_override() {
            config.logger.level = level.to_string();
        }

        match &cli.command {
            Commands::Resolve {
                strict,
                prefix,
                events,
                ..
            } => {
                if *strict {
                    config.resolver.policy = InferencePolicy::Strict;
                }
                if let Some(prefix) = prefix {
                    config.resolver.prefix = prefix.clone();
                }
                // Events are logged at info level
                if *events && Self::is_quieter_than_info(&config.logger.level) && !cli.quiet {
                    config.logger.level = "info".to_string();
                }
            }
            Commands::Keys { prefix, .. } => {
                if let Some(prefix) = prefix {
                    config.resolver.prefix = prefix.clone();
                }
            }
            Commands::Get { .. } => {}
        }

        config.validate()?;
        Ok(config)
    }

    fn is_quieter_than_info(level: &str) -> bool {
        level.eq_ignore_ascii_case("warn") || level.eq_ignore_ascii_case("error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::NamedTempFile;

    fn merge(args: &[&str]) -> Settings {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(Settings::default())
            .merge_cli_args(&cli)
            .unwrap()
    }

    #[test]
    fn test_no_overrides_keeps_base() {
        let settings = merge(&["envtree", "get", "A"]);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_verbose_and_quiet_override_level() {
        assert_eq!(merge(&["envtree", "-v", "get", "A"]).logger.level, "debug");
        assert_eq!(merge(&["envtree", "-q", "get", "A"]).logger.level, "error");
    }

    #[test]
    fn test_resolve_overrides_resolver_settings() {
        let schema = NamedTempFile::new().unwrap();
        let path = schema.path().to_str().unwrap();

        let settings = merge(&["envtree", "resolve", path, "--strict", "--prefix", "APP_"]);
        assert_eq!(settings.resolver.policy, InferencePolicy::Strict);
        assert_eq!(settings.resolver.prefix, "APP_");
    }

    #[test]
    fn test_events_raise_level_to_info() {
        let schema = NamedTempFile::new().unwrap();
        let path = schema.path().to_str().unwrap();

        assert_eq!(merge(&["envtree", "resolve", path, "--events"]).logger.level, "info");
        assert_eq!(
            merge(&["envtree", "-v", "resolve", path, "--events"]).logger.level,
            "debug"
        );
        assert_eq!(
            merge(&["envtree", "-q", "resolve", path, "--events"]).logger.level,
            "error"
        );
    }

    #[test]
    fn test_keys_prefix_override() {
        let schema = NamedTempFile::new().unwrap();
        let path = schema.path().to_str().unwrap();

        let settings = merge(&["envtree", "keys", path, "--prefix", "SVC_"]);
        assert_eq!(settings.resolver.prefix, "SVC_");
        assert_eq!(settings.resolver.policy, InferencePolicy::Legacy);
    }
}
