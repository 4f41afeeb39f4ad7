//! Resolution events
//!
//! Observers are called synchronously, in subscription order, at most
//! once per resolved leaf. They cannot change the resolved value, but a
//! failing observer aborts the resolution it was notified from.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

/// What happened while resolving one leaf
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ResolutionEvent {
    /// A candidate variable was set and converted
    Found { key: String, value: Value },
    /// No candidate was set and the declared default was used
    Fallback { key: String, default: Value },
}

impl ResolutionEvent {
    pub fn key(&self) -> &str {
        match self {
            ResolutionEvent::Found { key, .. } | ResolutionEvent::Fallback { key, .. } => key,
        }
    }

    pub fn value(&self) -> &Value {
        match self {
            ResolutionEvent::Found { value, .. } => value,
            ResolutionEvent::Fallback { default, .. } => default,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ResolutionEvent::Found { .. })
    }
}

impl fmt::Display for ResolutionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionEvent::Found { key, value } => {
                write!(f, "{key} was defined, using: {value}")
            }
            ResolutionEvent::Fallback { key, default } => {
                write!(f, "{key} was not defined, using default: {default}")
            }
        }
    }
}

/// Subscriber notified of every [`ResolutionEvent`]
pub trait Observer {
    fn notify(&mut self, event: &ResolutionEvent) -> anyhow::Result<()>;
}

impl<F> Observer for F
where
    F: FnMut(&ResolutionEvent) -> anyhow::Result<()>,
{
    fn notify(&mut self, event: &ResolutionEvent) -> anyhow::Result<()> {
        self(event)
    }
}

/// Ordered list of observers
#[derive(Default)]
pub struct EventChannel {
    observers: Vec<Box<dyn Observer>>,
}

impl EventChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer after the ones already subscribed
    pub fn subscribe(&mut self, observer: impl Observer + 'static) -> &mut Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Notify every observer in order, stopping at the first failure
    pub fn emit(&mut self, event: &ResolutionEvent) -> anyhow::Result<()> {
        for observer in &mut self.observers {
            observer.notify(event)?;
        }
        Ok(())
    }
}

impl fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Observer keeping every event it receives
///
/// Clones share the same log, so one handle can be subscribed while the
/// caller keeps another to read the events back.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<ResolutionEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ResolutionEvent> {
        self.events.borrow().clone()
    }

    /// Keys of the `Found` events, in emission order
    pub fn found_keys(&self) -> Vec<String> {
        self.keys_where(ResolutionEvent::is_found)
    }

    /// Keys of the `Fallback` events, in emission order
    pub fn fallback_keys(&self) -> Vec<String> {
        self.keys_where(|event| !event.is_found())
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn keys_where(&self, predicate: impl Fn(&ResolutionEvent) -> bool) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter(|event| predicate(event))
            .map(|event| event.key().to_string())
            .collect()
    }
}

impl Observer for EventRecorder {
    fn notify(&mut self, event: &ResolutionEvent) -> anyhow::Result<()> {
        self.events.borrow_mut().push(event.clone());
        Ok(())
    }
}

/// Observer writing each event to the `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver;

impl Observer for LoggingObserver {
    fn notify(&mut self, event: &ResolutionEvent) -> anyhow::Result<()> {
        match event {
            ResolutionEvent::Found { key, value } => {
                tracing::info!(key = %key, "{key} was defined, using: {value}");
            }
            ResolutionEvent::Fallback { key, default } => {
                tracing::info!(key = %key, "{key} was not defined, using default: {default}");
            }
        }
        Ok(())
    }
}
