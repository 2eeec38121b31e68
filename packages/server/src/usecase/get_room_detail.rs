//! UseCase: ルーム詳細取得

use std::sync::Arc;

use crate::domain::{RoomId, RoomRegistry, RoomSnapshot};

use super::error::GetRoomDetailError;

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomDetailUseCase {
    /// 新しい GetRoomDetailUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 指定ルームのスナップショットを返す（読み取り専用）
    ///
    /// # Returns
    ///
    /// * `Ok(RoomSnapshot)` - ルームの現在状態
    /// * `Err(GetRoomDetailError::RoomNotFound)` - ルームが存在しない
    pub async fn execute(&self, room_id: &RoomId) -> Result<RoomSnapshot, GetRoomDetailError> {
        self.registry
            .snapshot(room_id)
            .await
            .ok_or(GetRoomDetailError::RoomNotFound)
    }
}
