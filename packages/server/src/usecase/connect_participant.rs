//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 接続の登録、履歴スナップショットと接続数の送信、接続数のブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 新しい接続が最初に受け取る 2 つのイベントが「履歴 → 接続数」の順であることを保証
//! - 既存の接続にも最新の接続数が通知されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：履歴が空の状態での接続
//! - 正常系：履歴がある状態での接続
//! - 正常系：複数クライアントの順次接続

use crate::domain::{ConnectionId, PusherChannel, RelayEvent, SharedRelay};

/// 参加者接続のユースケース（Connecting → Open）
pub struct ConnectParticipantUseCase {
    /// Relay の共有ハンドル（履歴 + 接続レジストリ）
    relay: SharedRelay,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(relay: SharedRelay) -> Self {
        Self { relay }
    }

    /// 参加者接続を実行
    ///
    /// 1. 接続をレジストリに登録
    /// 2. この接続にだけ履歴スナップショットを送信
    /// 3. この接続にだけ現在の接続数を送信
    /// 4. 全接続（新しい接続を含む）に接続数をブロードキャスト
    ///
    /// 全ての手順を 1 つのロックの中で行う。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 新しい接続の ID（サーバー側で採番）
    /// * `sender` - 接続へのイベント送信用チャンネル
    ///
    /// # Returns
    ///
    /// 登録後の接続数
    pub async fn execute(&self, connection_id: ConnectionId, sender: PusherChannel) -> usize {
        let mut relay = self.relay.lock().await;

        relay.register(connection_id, sender);
        let count = relay.connection_count();

        let history = relay.history_snapshot();
        let history_len = history.len();
        if let Err(e) = relay.push_to(&connection_id, RelayEvent::History(history)) {
            tracing::warn!("Failed to send history to '{}': {}", connection_id, e);
        } else {
            tracing::debug!(
                "Sent history ({} messages) to '{}'",
                history_len,
                connection_id
            );
        }

        if let Err(e) = relay.push_to(&connection_id, RelayEvent::UsersCount(count)) {
            tracing::warn!("Failed to send users count to '{}': {}", connection_id, e);
        }

        relay.broadcast(&RelayEvent::UsersCount(count));

        count
    }
}
