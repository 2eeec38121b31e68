//! メッセージ送信（通知）のインターフェース
//!
//! ブロードキャストの具体的な実装は Infrastructure 層が提供します
//! （依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::entity::Member;

/// セッションの送信キューへのハンドル
///
/// Connection Session が所有する WebSocket 送信タスクへの入口。
/// クローンが Member としてレジストリに渡り、生存確認にも使われる。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// メッセージ送信の抽象
///
/// ブロードキャストは fire-and-forget：個々の送信失敗は他メンバーへの
/// 配送を妨げず、呼び出し元へエラーとして伝播しない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 対象メンバー全員へ直列化済みフレームを送信する
    ///
    /// 配送に成功した件数を返す（診断用）。
    async fn broadcast(&self, targets: &[Member], content: &str) -> usize;
}
