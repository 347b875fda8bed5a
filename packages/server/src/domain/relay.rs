//! The relay aggregate: connection registry plus message history.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::{
    entity::ChatMessage,
    error::MessagePushError,
    event::RelayEvent,
    history::MessageHistory,
    registry::{ConnectionRegistry, PusherChannel},
    value_object::ConnectionId,
};

/// Handle shared by the coordinator use cases.
///
/// The one mutex guards history, registry and fan-out together. Holding it
/// across validate -> stamp -> append -> broadcast keeps every client on the
/// same total order of events.
pub type SharedRelay = Arc<Mutex<Relay>>;

/// The only shared mutable state of the relay.
///
/// Constructed once at process start (or per test) and handed to the use
/// cases. Nothing outside the coordinator holds a mutable reference.
#[derive(Debug, Default)]
pub struct Relay {
    registry: ConnectionRegistry,
    history: MessageHistory,
}

impl Relay {
    /// Create a relay with the default history capacity
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a relay whose history keeps at most `capacity` messages
    pub fn with_history_capacity(capacity: usize) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            history: MessageHistory::with_capacity(capacity),
        }
    }

    /// Wrap into the shared handle
    pub fn into_shared(self) -> SharedRelay {
        Arc::new(Mutex::new(self))
    }

    pub fn register(&mut self, connection_id: ConnectionId, sender: PusherChannel) {
        self.registry.register(connection_id, sender);
    }

    pub fn deregister(&mut self, connection_id: &ConnectionId) -> bool {
        self.registry.deregister(connection_id)
    }

    pub fn is_connected(&self, connection_id: &ConnectionId) -> bool {
        self.registry.contains(connection_id)
    }

    pub fn connection_count(&self) -> usize {
        self.registry.count()
    }

    pub fn append_message(&mut self, message: ChatMessage) {
        if let Some(evicted) = self.history.append(message) {
            tracing::trace!("Evicted message '{}' from history", evicted.id);
        }
    }

    pub fn history_snapshot(&self) -> Vec<ChatMessage> {
        self.history.snapshot()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_capacity(&self) -> usize {
        self.history.capacity()
    }

    pub fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: RelayEvent,
    ) -> Result<(), MessagePushError> {
        self.registry.push_to(connection_id, event)
    }

    pub fn broadcast(&self, event: &RelayEvent) -> usize {
        self.registry.broadcast(event)
    }
}
