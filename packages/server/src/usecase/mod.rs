//! UseCase 層
//!
//! Broadcast Coordinator を構成するユースケース群。
//! UI 層から呼び出され、Domain 層（Relay）を操作します。

pub mod connect_participant;
pub mod disconnect_participant;
pub mod error;
pub mod get_relay_stats;
pub mod send_message;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::SendMessageError;
pub use get_relay_stats::{GetRelayStatsUseCase, RelayStats};
pub use send_message::{SendMessageCommand, SendMessageUseCase};
