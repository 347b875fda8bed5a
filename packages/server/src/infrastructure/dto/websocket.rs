//! WebSocket event DTOs for the chat relay.
//!
//! Every text frame carries exactly one event envelope:
//!
//! ```text
//! {"event": "chat:message", "data": { ... }}
//! ```

use serde::{Deserialize, Deserializer, Serialize};

/// Sender identity as it appears on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub name: String,
    /// Any non-string value is read as absent
    #[serde(
        default,
        deserialize_with = "deserialize_avatar",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar: Option<String>,
}

fn deserialize_avatar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(url)) => Ok(Some(url)),
        Some(other) => {
            tracing::debug!("Ignoring non-string avatar: {}", other);
            Ok(None)
        }
        None => Ok(None),
    }
}

/// Chat message payload sent by a client
///
/// Both fields are required strings; anything else fails to deserialize
/// and the frame is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingChatMessageDto {
    pub user: UserDto,
    pub text: String,
}

/// Chat message as broadcast by the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageDto {
    pub id: String,
    pub user: UserDto,
    pub sender_connection_id: String,
    pub text: String,
    /// RFC 3339 UTC with milliseconds
    pub timestamp: String,
}

/// Client -> server events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEventDto {
    #[serde(rename = "chat:message")]
    ChatMessage(IncomingChatMessageDto),
}

/// Server -> client events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEventDto {
    #[serde(rename = "chat:history")]
    ChatHistory(Vec<ChatMessageDto>),
    #[serde(rename = "chat:message")]
    ChatMessage(ChatMessageDto),
    #[serde(rename = "users:count")]
    UsersCount(usize),
}
