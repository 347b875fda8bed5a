//! Events pushed from the relay to connected clients.

use super::entity::ChatMessage;

/// A server -> client event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// History snapshot, oldest first. Sent once right after connect.
    History(Vec<ChatMessage>),
    /// A newly accepted message, sent to every connection.
    Message(ChatMessage),
    /// Current live connection count.
    UsersCount(usize),
}

impl RelayEvent {
    /// Event name used for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::History(_) => "chat:history",
            Self::Message(_) => "chat:message",
            Self::UsersCount(_) => "users:count",
        }
    }
}
