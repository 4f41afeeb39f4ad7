//! CLI module for envtree
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Configuration merging (CLI args + config files)
//! - Command dispatch to the resolve, keys and get handlers

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

// Re-export public types for convenience
pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands};

use crate::config::Settings;
use crate::error::AppResult;
use crate::logger::init_logger;

/// Load settings and apply the CLI overrides
///
/// # Errors
/// Returns error if configuration loading, merging, or validation fails
pub fn load_and_merge_config(cli: &Cli) -> AppResult<Settings> {
    let merger = ConfigurationMerger::from_config_path(cli.config.as_deref())?;
    Ok(merger.merge_cli_args(cli)?)
}

/// Initialize logger from settings
///
/// # Errors
/// Returns error if the level is invalid or a subscriber is already set
pub fn init_logger_from_settings(settings: &Settings) -> AppResult<()> {
    init_logger(&settings.logger.to_logger_config())?;
    Ok(())
}
