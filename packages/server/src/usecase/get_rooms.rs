//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{RoomId, RoomRegistry, RoomSnapshot};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomsUseCase {
    /// 新しい GetRoomsUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 存在する全ルームのスナップショット一覧を返す（読み取り専用）
    pub async fn execute(&self) -> Vec<(RoomId, RoomSnapshot)> {
        self.registry.list_rooms().await
    }
}
