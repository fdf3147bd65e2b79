//! Fire-and-forget lifecycle event hooks.
//!
//! The host selector emits events at its state-change points. Subscribers
//! are invoked synchronously in registration order, after the corresponding
//! state change and before control returns to the caller. Correctness never
//! depends on a subscriber being present.

use std::fmt;

/// Lifecycle events emitted by the host selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvEvent {
    /// A host was selected and the environment initialized.
    Initialized { host: String },
    /// The selected host's bootstrap was loaded.
    BootstrapLoaded { host: String },
    /// No host pattern matched; the fallback host was selected.
    FallbackSelected { host: String },
}

impl EnvEvent {
    /// The key of the host this event concerns.
    pub fn host(&self) -> &str {
        match self {
            Self::Initialized { host }
            | Self::BootstrapLoaded { host }
            | Self::FallbackSelected { host } => host,
        }
    }
}

type Subscriber = Box<dyn Fn(&EnvEvent) + Send + Sync>;

/// A subscriber list for lifecycle events.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber. Subscribers are invoked in registration order.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: Fn(&EnvEvent) + Send + Sync + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    /// Invoke every subscriber with the event.
    pub fn emit(&self, event: &EnvEvent) {
        for subscriber in &self.subscribers {
            subscriber(event);
        }
    }

    /// Number of registered subscribers.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Whether no subscribers are registered.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
