//! UseCase: セッション接続の登録

use std::sync::Arc;

use crate::domain::RoomRegistry;

/// セッション接続のユースケース
pub struct ConnectSessionUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl ConnectSessionUseCase {
    /// 新しい ConnectSessionUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 新しい接続を診断用カウンタに登録し、現在の接続数を返す
    pub async fn execute(&self) -> usize {
        self.registry.register_connection().await
    }

    /// 現在の接続数を取得（診断用）
    pub async fn connection_count(&self) -> usize {
        self.registry.connection_count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repository::InMemoryRoomRegistry;

    #[tokio::test]
    async fn test_connect_session_increments_counter() {
        // テスト項目: 接続登録でカウンタが増える
        // given (前提条件):
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let usecase = ConnectSessionUseCase::new(registry.clone());

        // when (操作):
        let count1 = usecase.execute().await;
        let count2 = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(count1, 1);
        assert_eq!(count2, 2);
        assert_eq!(usecase.connection_count().await, 2);
    }
}
