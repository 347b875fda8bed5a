//! Domain layer error definitions.

use thiserror::Error;

use super::value_object::ConnectionId;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// DisplayName validation error
    #[error("DisplayName cannot be empty")]
    DisplayNameEmpty,

    /// DisplayName too long error
    #[error("DisplayName cannot exceed {max} characters (got {actual})")]
    DisplayNameTooLong { max: usize, actual: usize },

    /// MessageContent validation error
    #[error("MessageContent cannot be empty")]
    MessageContentEmpty,

    /// MessageContent too long error
    #[error("MessageContent cannot exceed {max} characters (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },

    /// AvatarUrl validation error
    #[error("AvatarUrl cannot be empty")]
    AvatarUrlEmpty,

    /// AvatarUrl too long error
    #[error("AvatarUrl cannot exceed {max} characters (got {actual})")]
    AvatarUrlTooLong { max: usize, actual: usize },
}

/// Errors raised while pushing an event to a single connection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagePushError {
    /// The connection is not registered
    #[error("Connection '{0}' is not registered")]
    ConnectionNotFound(ConnectionId),

    /// The connection's outbound channel is closed (socket already gone)
    #[error("Outbound channel for connection '{0}' is closed")]
    ChannelClosed(ConnectionId),
}
