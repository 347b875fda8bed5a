//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{ConnectionId, ValueObjectError};

/// メッセージ送信時のエラー
///
/// どちらの場合もメッセージは破棄され、送信者にもエラーは通知されない。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// ペイロードの検証に失敗した（名前・本文が空、長すぎる等）
    #[error("Invalid chat payload: {0}")]
    InvalidPayload(#[from] ValueObjectError),

    /// 送信元の接続が既に登録解除されている
    #[error("Sender connection '{0}' is not connected")]
    SenderNotConnected(ConnectionId),
}
