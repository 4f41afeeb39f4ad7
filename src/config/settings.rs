//! Configuration settings structures for envtree

use serde::{Deserialize, Serialize};

use crate::engine::InferencePolicy;
use crate::logger::LoggerConfig;

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_format() -> String {
    "full".to_string()
}

/// Logging settings, turned into a [`LoggerConfig`] at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: trace, debug, info, warn or error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to use colored output when stderr is a terminal
    #[serde(default = "default_true")]
    pub colored: bool,

    /// Output format: full, compact or json
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            colored: default_true(),
            format: default_log_format(),
        }
    }
}

impl LoggerSettings {
    /// Build the logger configuration; call [`LoggerSettings::validate`] first
    pub fn to_logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: self.level.to_lowercase(),
            colored: self.colored,
            format: self.format.parse().unwrap_or_default(),
        }
    }
}

/// Defaults applied to every `resolve` run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// `legacy` infers conversions from defaults, `strict` requires `$type`
    #[serde(default)]
    pub policy: InferencePolicy,

    /// Prefix prepended to every derived key, e.g. `APP_`
    #[serde(default)]
    pub prefix: String,
}

/// Root settings structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logger: LoggerSettings,

    #[serde(default)]
    pub resolver: ResolverSettings,
}
