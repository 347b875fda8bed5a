//! Domain layer for the chat relay.
//!
//! This module contains the relay state (registry, history) and the values
//! flowing through it, independent of wire DTOs and transport concerns.

pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod history;
pub mod registry;
pub mod relay;
pub mod value_object;

pub use entity::{ChatMessage, UnauthenticatedUser};
pub use error::{MessagePushError, ValueObjectError};
pub use event::RelayEvent;
pub use factory::{ConnectionIdFactory, MessageIdFactory};
pub use history::{DEFAULT_HISTORY_CAPACITY, MessageHistory};
pub use registry::{ConnectionRegistry, PusherChannel};
pub use relay::{Relay, SharedRelay};
pub use value_object::{
    AvatarUrl, ConnectionId, DisplayName, MessageContent, MessageId, Timestamp,
};
