//! UseCase: セッション切断時の後始末
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectSessionUseCase::execute() メソッド
//! - 表示名の解放・追跡ルームからの退出・接続カウンタの減算
//!
//! ### なぜこのテストが必要か
//! - 異常切断でもレジストリの整合性が保たれることの保証
//! - 切断による退出で空になったルームが削除されることの確認
//! - stats を配信すべきルームが正しく報告されることの検証
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルーム参加中のセッションの切断
//! - エッジケース：何も送らずに切断したセッション
//! - エッジケース：表示名だけ設定して切断したセッション

use std::sync::Arc;

use crate::domain::{RoomId, RoomRegistry, UserId};

/// セッション切断のユースケース
pub struct DisconnectSessionUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl DisconnectSessionUseCase {
    /// 新しい DisconnectSessionUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 切断時の後始末を実行
    ///
    /// 1. user が設定されていれば表示名を解放する
    /// 2. ルームを追跡していれば退出させる（空になったルームは削除される）
    /// 3. 接続カウンタをデクリメントする
    ///
    /// graceful close と異常切断のどちらでも同じ経路を通る。
    ///
    /// # Returns
    ///
    /// 退出が発生した場合、stats を配信すべきルームの ID。
    /// ルームが退出によって削除されていれば配信は no-op になる。
    pub async fn execute(
        &self,
        user_id: Option<UserId>,
        room_id: Option<RoomId>,
    ) -> Option<RoomId> {
        if let Some(user) = &user_id {
            self.registry.set_display_name(user, None).await;
        }

        let affected = match (&user_id, room_id) {
            (Some(user), Some(room)) => {
                tracing::info!("'{}' left '{}' on disconnect", user.as_str(), room.as_str());
                self.registry.leave(&room, user).await;
                Some(room)
            }
            _ => None,
        };

        let count = self.registry.unregister_connection().await;
        tracing::debug!("Connection unregistered ({} active)", count);

        affected
    }
}
