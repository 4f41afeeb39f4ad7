//! Environment variable naming convention
//!
//! Key names are derived purely from the schema path:
//! - `a.b.c` becomes `A_B_C`
//! - `plop.api[0].a` becomes `PLOP_API[0]_A`
//!
//! Brackets and indices are part of the literal key and are never
//! sanitized. Schema key case is irrelevant since only the uppercased form
//! is used, so sibling keys differing only in case derive the same name.

use std::fmt;

/// Accumulated prefix for the keys below one schema node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPrefix(String);

impl KeyPrefix {
    /// Prefix of the schema root (empty)
    pub fn root() -> Self {
        Self::default()
    }

    /// Start from an explicit prefix, e.g. `APP_`
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    /// Canonical key for a child field: the prefix followed by the
    /// uppercased field name
    pub fn derive_key(&self, child: &str) -> String {
        let mut key = String::with_capacity(self.0.len() + child.len());
        key.push_str(&self.0);
        key.push_str(&child.to_uppercase());
        key
    }

    /// Prefix for the children of the node stored under `key`
    pub fn under(key: &str) -> Self {
        Self(format!("{key}_"))
    }

    /// Prefix used when descending into a nested object field
    pub fn nest(&self, child: &str) -> Self {
        Self::under(&self.derive_key(child))
    }

    /// Prefix used when descending into element `index` of the array
    /// stored under `key`
    pub fn derive_array_key(key: &str, index: usize) -> Self {
        Self::under(&Self::element_key(key, index))
    }

    /// Key of a non-object array element, resolved as a single leaf
    pub fn element_key(key: &str, index: usize) -> String {
        format!("{key}[{index}]")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_object_path() {
        let key = KeyPrefix::root().nest("a").nest("b").derive_key("c");
        assert_eq!(key, "A_B_C");
    }

    #[test]
    fn test_mixed_case_field() {
        let key = KeyPrefix::root().nest("AMQP").derive_key("LoGiN");
        assert_eq!(key, "AMQP_LOGIN");
    }

    #[test]
    fn test_array_element_path() {
        let api = KeyPrefix::root().nest("plop").derive_key("api");
        let element = KeyPrefix::derive_array_key(&api, 0);
        assert_eq!(element.as_str(), "PLOP_API[0]_");
        assert_eq!(element.derive_key("a"), "PLOP_API[0]_A");
    }

    #[test]
    fn test_element_key() {
        assert_eq!(KeyPrefix::element_key("A_B", 2), "A_B[2]");
    }

    #[test]
    fn test_explicit_prefix() {
        assert_eq!(KeyPrefix::new("APP_").derive_key("port"), "APP_PORT");
    }

    proptest! {
        #[test]
        fn property_derived_key_is_uppercase_path(
            parent in "[a-zA-Z][a-zA-Z0-9]{0,8}",
            child in "[a-zA-Z][a-zA-Z0-9_]{0,8}"
        ) {
            let key = KeyPrefix::root().nest(&parent).derive_key(&child);
            prop_assert_eq!(key, format!("{}_{}", parent.to_uppercase(), child.to_uppercase()));
        }

        #[test]
        fn property_case_never_changes_key(name in "[a-zA-Z]{1,12}") {
            let prefix = KeyPrefix::new("X_");
            prop_assert_eq!(
                prefix.derive_key(&name.to_lowercase()),
                prefix.derive_key(&name.to_uppercase())
            );
        }
    }
}
