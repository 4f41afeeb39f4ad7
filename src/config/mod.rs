//! Settings of the `envtree` binary itself
//!
//! Settings are loaded with the `config` crate from:
//! 1. built-in defaults
//! 2. an optional TOML file (`--config` or `ENVTREE_CONFIG_FILE`)
//! 3. `ENVTREE_*` environment variables, `__` separating nested keys
//!
//! These only tune the tool (logging, resolver policy). The schemas the
//! tool resolves are handled by [`crate::engine`].

pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

// Re-export public types
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{LoggerSettings, ResolverSettings, Settings};
