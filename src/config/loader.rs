//! Configuration loader for envtree
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! settings from a TOML file and the environment with proper precedence.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for a specific configuration file
pub const CONFIG_FILE_ENV: &str = "ENVTREE_CONFIG_FILE";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "ENVTREE";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader
///
/// Sources, lowest priority first:
/// 1. serde defaults of [`Settings`]
/// 2. the configuration file, when one is given
/// 3. `ENVTREE_*` environment variables
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Configuration file path; when set the file must exist
    config_file: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader using `ENVTREE_CONFIG_FILE` when it is set
    pub fn new() -> Self {
        Self {
            config_file: std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from),
        }
    }

    /// Create a loader reading the given file; takes precedence over
    /// `ENVTREE_CONFIG_FILE`
    pub fn with_file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_file: Some(path.into()),
        }
    }

    /// Get the configuration file path, if any
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Load and validate settings from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the configuration file is set but missing
    /// - configuration parsing fails
    /// - configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {e}"))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    /// Build the config::Config instance from all sources
    fn build_config(&self) -> Result<Config, ConfigError> {
        let mut builder = Config::builder();

        if let Some(ref config_file) = self.config_file {
            builder = Self::add_file_source(builder, config_file)?;
        }

        // ENVTREE_LOGGER__LEVEL -> logger.level
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    fn add_file_source(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: &Path,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::file_not_found(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(
            File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(true),
        ))
    }

    /// Environment variables with prefix `ENVTREE_` are mapped to settings
    /// keys, double underscores separating nested keys:
    /// - `ENVTREE_LOGGER__LEVEL` -> `logger.level`
    /// - `ENVTREE_RESOLVER__POLICY` -> `resolver.policy`
    fn add_env_source(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> config::ConfigBuilder<config::builder::DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::InferencePolicy;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Global mutex to ensure tests run sequentially to avoid env var conflicts
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("envtree.toml");
        fs::write(&path, content).expect("Failed to write config file");
        (temp_dir, path)
    }

    /// Helper to safely set environment variables for a test
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            Self {
                vars_to_restore: Vec::new(),
            }
        }

        fn set(&mut self, key: &str, value: &str) {
            let original = std::env::var(key).ok();
            self.vars_to_restore.push((key.to_string(), original));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            let original = std::env::var(key).ok();
            self.vars_to_restore.push((key.to_string(), original));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    fn clean_env() -> EnvGuard {
        let mut env = EnvGuard::new();
        env.remove(CONFIG_FILE_ENV);
        env.remove("ENVTREE_LOGGER__LEVEL");
        env.remove("ENVTREE_RESOLVER__POLICY");
        env.remove("ENVTREE_RESOLVER__PREFIX");
        env
    }

    #[test]
    fn test_load_defaults_without_file() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let _env = clean_env();

        let loader = ConfigLoader::new();
        assert!(loader.config_file().is_none());

        let settings = loader.load().expect("Should load settings");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_config_file_from_env() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = clean_env();
        env.set(CONFIG_FILE_ENV, "/path/to/envtree.toml");

        let loader = ConfigLoader::new();
        assert_eq!(loader.config_file(), Some(Path::new("/path/to/envtree.toml")));
    }

    #[test]
    fn test_load_missing_file() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let _env = clean_env();

        let result = ConfigLoader::with_file("/does/not/exist.toml").load();
        match result {
            Err(ConfigError::FileNotFound(msg)) => assert!(msg.contains("exist.toml")),
            other => panic!("Expected FileNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let _env = clean_env();

        let (_dir, path) = write_config(
            r#"
[logger]
level = "debug"
format = "compact"

[resolver]
policy = "strict"
prefix = "APP_"
"#,
        );

        let settings = ConfigLoader::with_file(&path).load().expect("Should load settings");
        assert_eq!(settings.logger.level, "debug");
        assert_eq!(settings.logger.format, "compact");
        assert!(settings.logger.colored);
        assert_eq!(settings.resolver.policy, InferencePolicy::Strict);
        assert_eq!(settings.resolver.prefix, "APP_");
    }

    #[test]
    fn test_env_var_overrides_file() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = clean_env();

        let (_dir, path) = write_config(
            r#"
[logger]
level = "debug"
"#,
        );
        env.set("ENVTREE_LOGGER__LEVEL", "error");
        env.set("ENVTREE_RESOLVER__POLICY", "strict");

        let settings = ConfigLoader::with_file(&path).load().expect("Should load settings");
        assert_eq!(settings.logger.level, "error");
        assert_eq!(settings.resolver.policy, InferencePolicy::Strict);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let _env = clean_env();

        let (_dir, path) = write_config(
            r#"
[logger]
level = "loud"
"#,
        );

        let result = ConfigLoader::with_file(&path).load();
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }
}
