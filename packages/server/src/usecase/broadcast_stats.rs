//! UseCase: stats スナップショットのブロードキャスト
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - BroadcastRoomStatsUseCase::execute() メソッド
//! - スナップショットの構築・直列化・配信
//!
//! ### なぜこのテストが必要か
//! - 変更イベントの後に全クライアントが再収束するための唯一の経路
//! - フレームがワイヤ形式（stats）どおりであることを保証する必要がある
//! - 削除済みルームに対して安全に no-op になることの検証
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数人ルームへの配信
//! - エッジケース：退出で削除された直後のルーム

use std::sync::Arc;

use crate::domain::{MessagePusher, RoomId, RoomRegistry};
use crate::infrastructure::dto::conversion::stats_message;

/// stats ブロードキャストのユースケース
pub struct BroadcastRoomStatsUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl BroadcastRoomStatsUseCase {
    /// 新しい BroadcastRoomStatsUseCase を作成
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 対象ルームの現在状態から stats フレームを構築し、生存メンバー全員へ配信する
    ///
    /// フレームの直列化は 1 回だけ行われる。ルームが存在しない場合は
    /// 何もしない（退出によって削除された直後のルームなど）。
    ///
    /// # Returns
    ///
    /// 配送に成功した件数（ルームが存在しなければ 0）
    pub async fn execute(&self, room_id: &RoomId) -> usize {
        let Some(snapshot) = self.registry.snapshot(room_id).await else {
            tracing::debug!(
                "Room '{}' is gone, skipping stats broadcast",
                room_id.as_str()
            );
            return 0;
        };

        let message = stats_message(room_id, &snapshot);
        let frame = match serde_json::to_string(&message) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!("Failed to serialize stats for '{}': {}", room_id.as_str(), e);
                return 0;
            }
        };

        let targets = self.registry.live_members(room_id).await;
        self.message_pusher.broadcast(&targets, &frame).await
    }
}
