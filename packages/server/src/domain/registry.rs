//! Live connection registry.
//!
//! ## Responsibilities
//!
//! - Track the outbound channel of every open connection
//! - Deliver an event to one connection (`push_to`) or to all of them (`broadcast`)
//!
//! The registry never touches a socket. Each connection's writer task drains its
//! channel and writes frames, so pushing here never blocks.

use std::collections::HashMap;

use tokio::sync::mpsc;

use super::{error::MessagePushError, event::RelayEvent, value_object::ConnectionId};

/// Outbound channel of a single connection
pub type PusherChannel = mpsc::UnboundedSender<RelayEvent>;

/// Set of live connections. `count()` is derived from the set, so it always
/// equals the number of registered connections and never goes below zero.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, PusherChannel>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to the live set
    pub fn register(&mut self, connection_id: ConnectionId, sender: PusherChannel) {
        if self.connections.insert(connection_id, sender).is_some() {
            tracing::warn!(
                "Connection '{}' registered twice, replacing its channel",
                connection_id
            );
        }
        tracing::debug!("Connection '{}' registered", connection_id);
    }

    /// Remove a connection. Returns `false` when it was not registered.
    pub fn deregister(&mut self, connection_id: &ConnectionId) -> bool {
        let removed = self.connections.remove(connection_id).is_some();
        if removed {
            tracing::debug!("Connection '{}' deregistered", connection_id);
        }
        removed
    }

    /// Current live connection count
    pub fn count(&self) -> usize {
        self.connections.len()
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.connections.contains_key(connection_id)
    }

    /// Snapshot of the registered connection ids (unspecified order)
    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.connections.keys().copied().collect()
    }

    /// Push an event to a single connection
    pub fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: RelayEvent,
    ) -> Result<(), MessagePushError> {
        let sender = self
            .connections
            .get(connection_id)
            .ok_or(MessagePushError::ConnectionNotFound(*connection_id))?;
        sender
            .send(event)
            .map_err(|_| MessagePushError::ChannelClosed(*connection_id))?;
        tracing::trace!("Pushed event to connection '{}'", connection_id);
        Ok(())
    }

    /// Push an event to every registered connection.
    ///
    /// Iterates a snapshot of the current ids. A failed push to one connection
    /// is logged and skipped. Returns the number of successful deliveries.
    pub fn broadcast(&self, event: &RelayEvent) -> usize {
        let targets = self.connection_ids();
        let mut delivered = 0;
        for target in &targets {
            match self.push_to(target, event.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!("Failed to push '{}': {}", event.name(), e),
            }
        }
        tracing::debug!(
            "Broadcasted '{}' to {}/{} connections",
            event.name(),
            delivered,
            targets.len()
        );
        delivered
    }
}
