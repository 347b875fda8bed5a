//! Core domain models for the chat relay.

use super::value_object::{
    AvatarUrl, ConnectionId, DisplayName, MessageContent, MessageId, Timestamp,
};

/// Identity hint attached to a message by the sending client.
///
/// Nothing here is authenticated. Keep this separate from any future
/// verified identity so it is never mistaken for one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnauthenticatedUser {
    /// Caller-supplied display name
    pub name: DisplayName,
    /// Caller-supplied avatar URL, passed through to other clients
    pub avatar: Option<AvatarUrl>,
}

impl UnauthenticatedUser {
    /// Create a user hint without an avatar
    pub fn new(name: DisplayName) -> Self {
        Self { name, avatar: None }
    }

    /// Attach an avatar URL
    pub fn with_avatar(mut self, avatar: Option<AvatarUrl>) -> Self {
        self.avatar = avatar;
        self
    }
}

/// A chat message accepted by the relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Server-generated identifier, used by clients for keying
    pub id: MessageId,
    /// Sender identity hint (untrusted)
    pub user: UnauthenticatedUser,
    /// Session the message arrived on
    pub sender_connection_id: ConnectionId,
    /// Message body
    pub content: MessageContent,
    /// Server-assigned receipt time
    pub timestamp: Timestamp,
}

impl ChatMessage {
    /// Create a new chat message
    pub fn new(
        id: MessageId,
        user: UnauthenticatedUser,
        sender_connection_id: ConnectionId,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            user,
            sender_connection_id,
            content,
            timestamp,
        }
    }

    /// Whether this message arrived on the given connection
    pub fn is_from(&self, connection_id: &ConnectionId) -> bool {
        &self.sender_connection_id == connection_id
    }
}
