//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 接続の登録解除、残りの接続への接続数ブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 切断時に残りの参加者へ最新の接続数が通知されることを保証
//! - 二重の切断通知が何も起こさない（冪等である）ことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の切断と通知
//! - エッジケース：最後の参加者の切断（通知対象なし）
//! - エッジケース：既に切断済みの接続の切断

use crate::domain::{ConnectionId, RelayEvent, SharedRelay};

/// 参加者切断のユースケース（Open → Closed）
pub struct DisconnectParticipantUseCase {
    /// Relay の共有ハンドル（履歴 + 接続レジストリ）
    relay: SharedRelay,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(relay: SharedRelay) -> Self {
        Self { relay }
    }

    /// 参加者切断を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 切断する接続の ID
    ///
    /// # Returns
    ///
    /// * `Some(usize)` - 登録解除後の接続数（残りの全接続にブロードキャスト済み）
    /// * `None` - 既に切断済みだった（何もしない）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<usize> {
        let mut relay = self.relay.lock().await;

        if !relay.deregister(connection_id) {
            tracing::debug!("Connection '{}' is already closed", connection_id);
            return None;
        }

        let count = relay.connection_count();
        relay.broadcast(&RelayEvent::UsersCount(count));

        Some(count)
    }
}
