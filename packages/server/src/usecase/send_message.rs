//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - ペイロード検証、ID・タイムスタンプの付与、履歴への追加、全接続へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 送信者を含む全接続に同じメッセージが届くことを保証（送信者はエコーで描画する）
//! - 不正なペイロードが履歴にもブロードキャストにも残らないことを確認
//! - 履歴が直近 K 件に制限されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト
//! - 異常系：名前・本文が空
//! - エッジケース：登録解除済みの接続からの送信

use std::sync::Arc;

use cinechat_shared::time::Clock;

use crate::domain::{
    AvatarUrl, ChatMessage, ConnectionId, DisplayName, MessageContent, MessageIdFactory,
    RelayEvent, SharedRelay, Timestamp, UnauthenticatedUser,
};

use super::error::SendMessageError;

/// クライアントから受け取った未検証のメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageCommand {
    /// 表示名（未認証）
    pub name: String,
    /// アバター URL（任意）
    pub avatar: Option<String>,
    /// 本文
    pub text: String,
}

impl SendMessageCommand {
    /// 表示名と本文だけのコマンドを作成
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: None,
            text: text.into(),
        }
    }

    /// 値オブジェクトへ変換して検証する
    ///
    /// 不正なアバター URL はメッセージ全体を拒否せず、アバターだけを捨てる。
    fn validate(self) -> Result<(UnauthenticatedUser, MessageContent), SendMessageError> {
        let name = DisplayName::try_from(self.name)?;
        let content = MessageContent::try_from(self.text)?;
        let avatar = self.avatar.and_then(|url| match AvatarUrl::try_from(url) {
            Ok(avatar) => Some(avatar),
            Err(e) => {
                tracing::debug!("Dropping invalid avatar: {}", e);
                None
            }
        });
        Ok((UnauthenticatedUser::new(name).with_avatar(avatar), content))
    }
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Relay の共有ハンドル（履歴 + 接続レジストリ）
    relay: SharedRelay,
    /// 受信時刻を決める時計
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(relay: SharedRelay, clock: Arc<dyn Clock>) -> Self {
        Self { relay, clock }
    }

    /// メッセージ送信を実行
    ///
    /// 検証 → ID・時刻の付与 → 履歴への追加 → ブロードキャストを 1 つのロックの中で行う。
    /// タイムスタンプはクライアントから受け取らず、受信時にサーバーが付与する。
    ///
    /// # Arguments
    ///
    /// * `sender_connection_id` - 送信元の接続 ID
    /// * `command` - 未検証のメッセージ
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 受理され全接続にブロードキャストされたメッセージ
    /// * `Err(SendMessageError)` - 破棄された（履歴もブロードキャストも発生しない）
    pub async fn execute(
        &self,
        sender_connection_id: ConnectionId,
        command: SendMessageCommand,
    ) -> Result<ChatMessage, SendMessageError> {
        let (user, content) = command.validate()?;

        let mut relay = self.relay.lock().await;

        if !relay.is_connected(&sender_connection_id) {
            return Err(SendMessageError::SenderNotConnected(sender_connection_id));
        }

        let message = ChatMessage::new(
            MessageIdFactory::generate(),
            user,
            sender_connection_id,
            content,
            Timestamp::new(self.clock.now_millis()),
        );

        relay.append_message(message.clone());
        let delivered = relay.broadcast(&RelayEvent::Message(message.clone()));

        tracing::info!(
            "Message '{}' from '{}' ({}) broadcasted to {} connections",
            message.id,
            message.user.name,
            sender_connection_id,
            delivered
        );

        Ok(message)
    }
}
