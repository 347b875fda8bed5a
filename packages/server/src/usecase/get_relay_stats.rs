//! UseCase: Relay の状態取得（読み取り専用）

use crate::domain::SharedRelay;

/// Relay の現在の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayStats {
    /// 接続中のクライアント数
    pub connected: usize,
    /// 履歴に保持しているメッセージ数
    pub history_len: usize,
    /// 履歴の最大件数
    pub history_capacity: usize,
}

/// Relay 状態取得のユースケース
pub struct GetRelayStatsUseCase {
    relay: SharedRelay,
}

impl GetRelayStatsUseCase {
    pub fn new(relay: SharedRelay) -> Self {
        Self { relay }
    }

    pub async fn execute(&self) -> RelayStats {
        let relay = self.relay.lock().await;
        RelayStats {
            connected: relay.connection_count(),
            history_len: relay.history_len(),
            history_capacity: relay.history_capacity(),
        }
    }
}
