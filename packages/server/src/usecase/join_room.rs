//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 参加によるルームの暗黙的な作成と冪等性
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：二重参加で人数が増えないこと
//! - 参加が再生状態に影響しないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ルームへの参加
//! - エッジケース：生存中の同 (room, user) への二重参加

use std::sync::Arc;

use crate::domain::{Member, RoomId, RoomRegistry};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム参加を実行
    ///
    /// ルームが無ければ作成される。同じ user の生存エントリが既に存在する
    /// 場合は何もしない（冪等）。参加イベント自体は中継されず、
    /// 後続の stats ブロードキャストだけが全員に届く。再生状態には
    /// 影響しない。失敗しない。
    pub async fn execute(&self, room_id: RoomId, member: Member) {
        tracing::info!("'{}' joined '{}'", member.id.as_str(), room_id.as_str());
        self.registry.join(room_id, member).await;
    }
}
