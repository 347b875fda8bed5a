//! Conversion logic between DTOs and domain entities.

use cinechat_shared::time::timestamp_to_rfc3339;

use crate::domain::{ChatMessage, RelayEvent, UnauthenticatedUser};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<UnauthenticatedUser> for dto::UserDto {
    fn from(model: UnauthenticatedUser) -> Self {
        Self {
            name: model.name.into_string(),
            avatar: model.avatar.map(|avatar| avatar.into_string()),
        }
    }
}

impl From<ChatMessage> for dto::ChatMessageDto {
    fn from(model: ChatMessage) -> Self {
        Self {
            id: model.id.to_string(),
            user: model.user.into(),
            sender_connection_id: model.sender_connection_id.to_string(),
            text: model.content.into_string(),
            timestamp: timestamp_to_rfc3339(model.timestamp.value()),
        }
    }
}

impl From<RelayEvent> for dto::ServerEventDto {
    fn from(event: RelayEvent) -> Self {
        match event {
            RelayEvent::History(messages) => {
                Self::ChatHistory(messages.into_iter().map(Into::into).collect())
            }
            RelayEvent::Message(message) => Self::ChatMessage(message.into()),
            RelayEvent::UsersCount(count) => Self::UsersCount(count),
        }
    }
}
