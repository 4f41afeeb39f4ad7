//! Read-only environment stores
//!
//! The resolver never touches the process environment directly; callers
//! hand it an [`EnvStore`], usually an [`EnvSnapshot`] taken once at
//! startup.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Flat key/value lookup consulted by the resolver
pub trait EnvStore {
    /// Raw value stored under `key`, `None` when the key is not set
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl<S: BuildHasher> EnvStore for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl EnvStore for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<T: EnvStore + ?Sized> EnvStore for &T {
    fn lookup(&self, key: &str) -> Option<&str> {
        (**self).lookup(key)
    }
}

/// Owned copy of an environment, frozen at construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        let vars: HashMap<String, String> = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        tracing::debug!(count = vars.len(), "Captured process environment");
        Self { vars }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvStore for EnvSnapshot {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
