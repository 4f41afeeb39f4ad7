//! Resolution engine
//!
//! Walks a [`SchemaNode`] tree and resolves every leaf against an
//! [`EnvStore`]:
//! - aliases are probed in declared order, the canonical key last
//! - the first candidate that is set wins and fires a `Found` event
//! - when nothing is set the declared default is used and fires a
//!   `Fallback` event on the canonical key
//! - a leaf with no default and no match fails the whole call

pub mod error;
pub mod explain;
pub(crate) mod walk;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::convert::{ConversionError, Inference, TypeConverter};
use crate::env::EnvStore;
use crate::events::{EventChannel, Observer, ResolutionEvent};
use crate::naming::KeyPrefix;
use crate::schema::{ConfigurationLeaf, Conversion, SchemaError, SchemaNode};

pub use error::{ResolveError, ResolveResult};
pub use explain::{KeyReport, explain};

use walk::{LeafSite, walk};

/// Whether leaves without an explicit converter are accepted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InferencePolicy {
    /// Infer the conversion from the default's shape
    #[default]
    Legacy,
    /// Every leaf must declare a converter
    Strict,
}

/// Resolves schemas against one environment snapshot
#[derive(Debug)]
pub struct Resolver<'e, E: EnvStore + ?Sized> {
    env: &'e E,
    channel: EventChannel,
    policy: InferencePolicy,
}

impl<'e, E: EnvStore + ?Sized> Resolver<'e, E> {
    pub fn new(env: &'e E) -> Self {
        Self::with_channel(env, EventChannel::new())
    }

    /// Use an existing set of observers
    pub fn with_channel(env: &'e E, channel: EventChannel) -> Self {
        Self {
            env,
            channel,
            policy: InferencePolicy::default(),
        }
    }

    pub fn policy(mut self, policy: InferencePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Register an observer notified after those already subscribed
    pub fn subscribe(&mut self, observer: impl Observer + 'static) -> &mut Self {
        self.channel.subscribe(observer);
        self
    }

    pub fn channel_mut(&mut self) -> &mut EventChannel {
        &mut self.channel
    }

    pub fn into_channel(self) -> EventChannel {
        self.channel
    }

    /// Resolve a whole schema tree
    ///
    /// # Errors
    ///
    /// Fails on the first leaf that cannot be resolved; no partial tree
    /// is returned.
    pub fn resolve_all(&mut self, schema: &SchemaNode) -> ResolveResult<Value> {
        self.resolve_all_with_prefix(schema, &KeyPrefix::root())
    }

    /// Resolve a schema whose derived keys all start with `prefix`
    pub fn resolve_all_with_prefix(
        &mut self,
        schema: &SchemaNode,
        prefix: &KeyPrefix,
    ) -> ResolveResult<Value> {
        let span = tracing::debug_span!("resolve_all", prefix = %prefix);
        let _enter = span.enter();

        walk(schema, prefix, &mut |site: LeafSite<'_>| self.resolve_leaf(&site))
    }

    /// Look up a single variable
    ///
    /// A miss is never an error: the default is returned, `None` when no
    /// default was given. A value that is set but fails conversion still
    /// fails.
    pub fn resolve_one(
        &mut self,
        key: &str,
        default: Option<Value>,
        converter: Option<&TypeConverter>,
    ) -> ResolveResult<Option<Value>> {
        let leaf = self.single_leaf(key, default, converter)?;

        match self.env.lookup(key) {
            Some(raw) => self.found(key, &leaf, raw).map(Some),
            None => match leaf.default {
                Some(default) => self.fallback(key, default).map(Some),
                None => {
                    tracing::debug!(key, "Variable not set and no default given");
                    Ok(None)
                }
            },
        }
    }

    /// Look up a single variable that must be set
    pub fn resolve_or_die(
        &mut self,
        key: &str,
        converter: Option<&TypeConverter>,
    ) -> ResolveResult<Value> {
        let leaf = self.single_leaf(key, None, converter)?;

        match self.env.lookup(key) {
            Some(raw) => self.found(key, &leaf, raw),
            None => Err(ResolveError::missing(key)),
        }
    }

    fn single_leaf(
        &self,
        key: &str,
        default: Option<Value>,
        converter: Option<&TypeConverter>,
    ) -> ResolveResult<ConfigurationLeaf> {
        let leaf = ConfigurationLeaf {
            default,
            aliases: Vec::new(),
            conversion: converter.map_or(Conversion::Inferred, |c| Conversion::Explicit(c.clone())),
        };
        self.check_policy(&leaf, key)?;
        Ok(leaf)
    }

    fn resolve_leaf(&mut self, site: &LeafSite<'_>) -> ResolveResult<Value> {
        let LeafSite { leaf, key, path } = *site;
        self.check_policy(leaf, path)?;

        for alias in &leaf.aliases {
            if let Some(raw) = self.env.lookup(alias) {
                return self.found(alias, leaf, raw);
            }
            tracing::trace!(alias = %alias, key, "Alias not set");
        }

        if let Some(raw) = self.env.lookup(key) {
            return self.found(key, leaf, raw);
        }

        match &leaf.default {
            Some(default) => self.fallback(key, default.clone()),
            None if leaf.aliases.is_empty() => Err(ResolveError::missing(key)),
            None => Err(ResolveError::missing_with_aliases(leaf.alias_chain(key))),
        }
    }

    fn check_policy(&self, leaf: &ConfigurationLeaf, path: &str) -> Result<(), SchemaError> {
        if self.policy == InferencePolicy::Strict && leaf.conversion == Conversion::Inferred {
            return Err(SchemaError::new(path, "no converter declared"));
        }
        Ok(())
    }

    fn found(&mut self, key: &str, leaf: &ConfigurationLeaf, raw: &str) -> ResolveResult<Value> {
        let value = convert(leaf, raw).map_err(|source| ResolveError::Conversion {
            key: key.to_string(),
            source,
        })?;
        tracing::debug!(key, "Resolved from environment");

        self.emit(ResolutionEvent::Found {
            key: key.to_string(),
            value: value.clone(),
        })?;
        Ok(value)
    }

    fn fallback(&mut self, key: &str, default: Value) -> ResolveResult<Value> {
        tracing::debug!(key, "Falling back to default");

        self.emit(ResolutionEvent::Fallback {
            key: key.to_string(),
            default: default.clone(),
        })?;
        Ok(default)
    }

    fn emit(&mut self, event: ResolutionEvent) -> ResolveResult<()> {
        self.channel
            .emit(&event)
            .map_err(|source| ResolveError::Observer {
                key: event.key().to_string(),
                source,
            })
    }
}

fn convert(leaf: &ConfigurationLeaf, raw: &str) -> Result<Value, ConversionError> {
    match &leaf.conversion {
        Conversion::Explicit(converter) => converter.convert(Some(raw)),
        Conversion::Inferred => Inference::from_default(leaf.default.as_ref()).convert(raw),
    }
}
