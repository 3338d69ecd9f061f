//! Event sink registry and scoped subscriptions.
//!
//! The provider is a process-wide resource potentially shared by several
//! consumer scopes. Each scope attaches its own sink and must detach it
//! when the scope ends; a handler left behind would keep firing into a
//! discarded state store. Detachment is tied to [`EventSubscription`]'s
//! `Drop`, so it happens on every exit path.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::{trace, warn};

use crate::events::ProviderEvent;

/// Fan-out registry of attached event sinks.
///
/// Provider implementations embed one of these and call
/// [`EventSinks::dispatch`] for every event the underlying provider
/// emits. Dispatch is non-blocking: a sink whose queue is full misses the
/// event, and closed sinks are pruned.
#[derive(Debug, Clone, Default)]
pub struct EventSinks {
    inner: Arc<SinksInner>,
}

#[derive(Debug, Default)]
struct SinksInner {
    next_id: AtomicU64,
    sinks: RwLock<HashMap<u64, mpsc::Sender<ProviderEvent>>>,
}

impl EventSinks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a sink, returning the guard that detaches it on drop.
    pub fn attach(&self, sink: mpsc::Sender<ProviderEvent>) -> EventSubscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.sinks.write().insert(id, sink);
        trace!(id, "event sink attached");
        EventSubscription {
            inner: Arc::clone(&self.inner),
            id,
        }
    }

    /// Deliver an event to every live sink.
    pub fn dispatch(&self, event: ProviderEvent) {
        let mut closed = Vec::new();
        {
            let sinks = self.inner.sinks.read();
            for (id, sink) in sinks.iter() {
                match sink.try_send(event.clone()) {
                    Ok(()) => {}
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        warn!(id, "event sink queue full, dropping provider event");
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => closed.push(*id),
                }
            }
        }
        if !closed.is_empty() {
            let mut sinks = self.inner.sinks.write();
            for id in closed {
                sinks.remove(&id);
            }
        }
    }

    /// Number of currently attached sinks.
    pub fn len(&self) -> usize {
        self.inner.sinks.read().len()
    }

    /// Whether no sink is attached.
    pub fn is_empty(&self) -> bool {
        self.inner.sinks.read().is_empty()
    }
}

/// Guard for one attached event sink.
///
/// Dropping the guard detaches the sink from the provider.
#[derive(Debug)]
pub struct EventSubscription {
    inner: Arc<SinksInner>,
    id: u64,
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.inner.sinks.write().remove(&self.id);
        trace!(id = self.id, "event sink detached");
    }
}
