//! UseCase: 一時停止の適用と中継
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PausePlaybackUseCase::execute() メソッド
//! - タイムラインの凍結（位置保持）とサーバー時計による凍結時刻の記録
//!
//! ### なぜこのテストが必要か
//! - pause が位置を変更しないことの保証（凍結済み位置の保持）
//! - 凍結時刻に注入された Clock が使われることの検証
//!
//! ### どのような状況を想定しているか
//! - 正常系：再生中ルームの一時停止
//! - エッジケース：存在しないルームへの pause

use std::sync::Arc;

use kotatsu_shared::time::Clock;

use crate::domain::{MessagePusher, RoomId, RoomRegistry, Timestamp};

/// 一時停止のユースケース
pub struct PausePlaybackUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 凍結時刻の記録に使うサーバー時計
    clock: Arc<dyn Clock>,
}

impl PausePlaybackUseCase {
    /// 新しい PausePlaybackUseCase を作成
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            clock,
        }
    }

    /// pause イベントを適用し、ルームの生存メンバーへ中継する
    ///
    /// タイムラインを直近の既知位置で凍結する。`position_seconds` は既に
    /// 凍結位置を反映しているため変更せず、凍結した時刻だけをサーバー時計で
    /// 記録する。後から参加したクライアントはこの時刻からドリフトなしに
    /// 位置を計算できる。状態遷移の適用後に中継フレームが送信される。
    ///
    /// # Returns
    ///
    /// 配送に成功した件数
    pub async fn execute(&self, room_id: &RoomId, frame: &str) -> usize {
        // 1. 凍結時刻を記録して状態遷移を適用
        let frozen_at = Timestamp::new(self.clock.now_millis());
        self.registry.set_paused(room_id, frozen_at).await;

        // 2. 生存メンバーへ中継
        let targets = self.registry.live_members(room_id).await;
        self.message_pusher.broadcast(&targets, frame).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Member, UserId};
    use crate::infrastructure::message_pusher::WebSocketMessagePusher;
    use crate::infrastructure::repository::InMemoryRoomRegistry;
    use kotatsu_shared::time::FixedClock;
    use tokio::sync::mpsc;

    fn create_test_registry() -> Arc<InMemoryRoomRegistry> {
        Arc::new(InMemoryRoomRegistry::new())
    }

    fn create_test_member(id: &str) -> (Member, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let member = Member::new(UserId::new(id.to_string()).unwrap(), tx);
        (member, rx)
    }

    fn room_id(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_pause_freezes_position_and_records_server_time() {
        // テスト項目: pause で位置が保持され、凍結時刻がサーバー時計で記録される
        // given (前提条件): 再生中のルーム
        let registry = create_test_registry();
        let usecase = PausePlaybackUseCase::new(
            registry.clone(),
            Arc::new(WebSocketMessagePusher::new()),
            Arc::new(FixedClock::new(5000)),
        );
        let (alice, mut rx) = create_test_member("alice");
        registry.join(room_id("room1"), alice).await;
        registry
            .set_playing(&room_id("room1"), 42.0, Timestamp::new(1000))
            .await;

        // when (操作):
        let delivered = usecase.execute(&room_id("room1"), "pause-frame").await;

        // then (期待する結果): 位置は 42.0 のまま、時刻は FixedClock の値
        assert_eq!(delivered, 1);
        assert_eq!(rx.recv().await, Some("pause-frame".to_string()));

        let snapshot = registry.snapshot(&room_id("room1")).await.unwrap();
        assert!(!snapshot.playing);
        assert_eq!(snapshot.position_seconds, 42.0);
        assert_eq!(snapshot.reference_timestamp, Timestamp::new(5000));
    }

    #[tokio::test]
    async fn test_pause_for_absent_room_is_noop() {
        // テスト項目: 存在しないルームへの pause はルームを作らず配送もしない
        // given (前提条件):
        let registry = create_test_registry();
        let usecase = PausePlaybackUseCase::new(
            registry.clone(),
            Arc::new(WebSocketMessagePusher::new()),
            Arc::new(FixedClock::new(5000)),
        );

        // when (操作):
        let delivered = usecase.execute(&room_id("ghost"), "frame").await;

        // then (期待する結果):
        assert_eq!(delivered, 0);
        assert!(registry.snapshot(&room_id("ghost")).await.is_none());
    }
}
