//! UseCase: 表示名の更新
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UpdateDisplayNameUseCase::execute() メソッド
//! - 表示名の設定・上書き・クリア
//!
//! ### なぜこのテストが必要か
//! - 表示名テーブルがルーム所属と独立に管理されることの確認
//! - stats の users に表示名が反映されることの検証
//!
//! ### どのような状況を想定しているか
//! - 正常系：設定とクリア
//! - エッジケース：ルームに参加していないユーザーの表示名設定

use std::sync::Arc;

use crate::domain::{DisplayName, RoomRegistry, UserId};

/// 表示名更新のユースケース
pub struct UpdateDisplayNameUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl UpdateDisplayNameUseCase {
    /// 新しい UpdateDisplayNameUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 表示名を設定またはクリアする
    ///
    /// ルーム所属・再生状態には影響せず、stats のブロードキャストも
    /// 発生しない。次に配信されるスナップショットから反映される。
    pub async fn execute(&self, user_id: &UserId, name: Option<DisplayName>) {
        match &name {
            Some(name) => {
                tracing::info!("'{}' set display name '{}'", user_id.as_str(), name.as_str())
            }
            None => tracing::info!("'{}' cleared display name", user_id.as_str()),
        }
        self.registry.set_display_name(user_id, name).await;
    }
}
