//! UseCase: ルーム退出処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - 退出による空ルームの削除
//!
//! ### なぜこのテストが必要か
//! - 不変条件「ルームキーは生存メンバーがいる間だけ存在する」の検証
//! - 存在しないルーム・ユーザーの退出が安全であることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数人のルームからの退出
//! - エッジケース：最後の 1 人の退出（ルーム削除）
//! - 異常系：存在しないルーム・ユーザーの退出

use std::sync::Arc;

use crate::domain::{RoomId, RoomRegistry, UserId};

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム退出を実行
    ///
    /// イベントが明示したルームと user に対して作用する（セッションが
    /// 追跡しているルームではない）。生存メンバーが 0 になったルームは
    /// その場で削除される。ルームや user が存在しない場合は何もしない。
    /// 再生状態には影響しない。
    pub async fn execute(&self, room_id: &RoomId, user_id: &UserId) {
        tracing::info!("'{}' left '{}'", user_id.as_str(), room_id.as_str());
        self.registry.leave(room_id, user_id).await;
    }
}
