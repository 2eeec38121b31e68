//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 各メンバーの送信キュー（`PusherChannel`）への直列化済みフレームの書き込み
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! 送信チャンネルは Registry が保持する Member が運ぶため、この実装は
//! 状態を持ちません。閉じた接続はスキップされ、個々の送信失敗は他メンバーへの
//! 配送を妨げません。

use async_trait::async_trait;

use crate::domain::{Member, MessagePusher};

/// WebSocket チャンネルへの MessagePusher 実装
pub struct WebSocketMessagePusher;

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn broadcast(&self, targets: &[Member], content: &str) -> usize {
        let mut delivered = 0;
        for member in targets {
            if !member.is_live() {
                tracing::debug!(
                    "Connection for '{}' is closed, skipping",
                    member.id.as_str()
                );
                continue;
            }
            // ブロードキャストでは個々の送信失敗を許容する
            if let Err(e) = member.channel.send(content.to_string()) {
                tracing::warn!(
                    "Failed to push message to '{}': {}",
                    member.id.as_str(),
                    e
                );
            } else {
                delivered += 1;
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - WebSocketMessagePusher のブロードキャスト機能
    // - 閉じた接続のスキップと配送件数のカウント
    //
    // 【なぜこのテストが必要か】
    // - MessagePusher は UseCase から呼ばれる通知層の中核
    // - 1 メンバーの失敗が他メンバーへの配送を妨げないことを保証する必要がある
    //
    // 【どのようなシナリオをテストするか】
    // 1. 全員生存時の配送
    // 2. 一部の接続が閉じている場合の部分配送
    // 3. 空のターゲットリスト
    // ========================================

    fn create_test_member(id: &str) -> (Member, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let member = Member::new(UserId::new(id.to_string()).unwrap(), tx);
        (member, rx)
    }

    #[tokio::test]
    async fn test_broadcast_delivers_to_all_live_members() {
        // テスト項目: 生存メンバー全員にフレームが配送される
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (alice, mut rx1) = create_test_member("alice");
        let (bob, mut rx2) = create_test_member("bob");

        // when (操作):
        let delivered = pusher.broadcast(&[alice, bob], "frame").await;

        // then (期待する結果):
        assert_eq!(delivered, 2);
        assert_eq!(rx1.recv().await, Some("frame".to_string()));
        assert_eq!(rx2.recv().await, Some("frame".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_skips_closed_connections() {
        // テスト項目: 閉じた接続はスキップされ、他メンバーへの配送は継続する
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (alice, mut rx1) = create_test_member("alice");
        let (bob, rx2) = create_test_member("bob");
        drop(rx2);

        // when (操作):
        let delivered = pusher.broadcast(&[bob, alice], "frame").await;

        // then (期待する結果): alice のみ受信
        assert_eq!(delivered, 1);
        assert_eq!(rx1.recv().await, Some("frame".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_empty_targets() {
        // テスト項目: 空のターゲットリストでも問題なく 0 を返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let delivered = pusher.broadcast(&[], "frame").await;

        // then (期待する結果):
        assert_eq!(delivered, 0);
    }
}
