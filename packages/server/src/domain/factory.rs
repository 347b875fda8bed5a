//! Domain factories for creating identifiers.

use uuid::Uuid;

use super::value_object::{ConnectionId, MessageId};

/// Factory for generating ConnectionId instances.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(Uuid::new_v4())
    }
}

/// Factory for generating MessageId instances.
///
/// UUID v7 carries a millisecond timestamp prefix followed by random bits.
/// There is no collision check.
pub struct MessageIdFactory;

impl MessageIdFactory {
    /// Generate a new time-ordered MessageId.
    pub fn generate() -> MessageId {
        MessageId::from_uuid(Uuid::now_v7())
    }
}
