//! envtree
//!
//! Resolve a declarative configuration schema against environment
//! variables. Every leaf of the schema is read from a variable whose name
//! is derived from its path (`amqp.login` -> `AMQP_LOGIN`), optionally
//! preceded by aliases, converted to a typed value and otherwise replaced
//! by its declared default.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod convert;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod logger;
pub mod naming;
pub mod schema;

pub use convert::{ConversionError, TypeConverter};
pub use engine::{InferencePolicy, KeyReport, ResolveError, ResolveResult, Resolver, explain};
pub use env::{EnvSnapshot, EnvStore};
pub use events::{EventChannel, EventRecorder, LoggingObserver, Observer, ResolutionEvent};
pub use naming::KeyPrefix;
pub use schema::{ConfigurationLeaf, Conversion, SchemaError, SchemaNode};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
