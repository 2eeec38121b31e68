//! Registry trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::entity::Member;
use super::snapshot::RoomSnapshot;
use super::value_object::{DisplayName, RoomId, Timestamp, UserId};

/// Room Registry trait
///
/// ルーム・メンバー・再生状態・表示名テーブル・接続カウンタという
/// プロセス全体の可変状態への唯一の入口。UseCase 層はこの trait に依存し、
/// Infrastructure 層の具体的な実装には依存しない。
///
/// ## 不変条件
///
/// - ルームキーは生存メンバーが 1 人以上いる間だけ存在する。空にする
///   可能性のある変更の直後、同じ操作の中で同期的に掃除される。
/// - 再生状態を更新するのは `set_playing` / `set_paused` のみ。
///   メンバーの増減では変化しない。
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// メンバーをルームに追加する
    ///
    /// ルームが無ければ作成される。同じ ID の生存エントリが既にあれば
    /// 何もしない（冪等）。失敗しない。
    async fn join(&self, room_id: RoomId, member: Member);

    /// ID が一致する最初のエントリをルームから削除する
    ///
    /// 生存メンバーが 0 になったルームはその場で削除される。
    /// ルームや user が存在しない場合は何もしない。
    async fn leave(&self, room_id: &RoomId, user_id: &UserId);

    /// 生存メンバー数（ルームが存在しなければ 0）
    async fn live_member_count(&self, room_id: &RoomId) -> usize;

    /// 生存メンバーの一覧（ルームが存在しなければ空）
    async fn live_members(&self, room_id: &RoomId) -> Vec<Member>;

    /// ルームのスナップショット（ルームが存在しなければ None）
    async fn snapshot(&self, room_id: &RoomId) -> Option<RoomSnapshot>;

    /// play イベントを適用する。ルームが存在しなければ何もしない。
    async fn set_playing(
        &self,
        room_id: &RoomId,
        position_seconds: f64,
        reference_timestamp: Timestamp,
    );

    /// pause イベントを適用する（位置は変更されない）。
    /// ルームが存在しなければ何もしない。
    async fn set_paused(&self, room_id: &RoomId, reference_timestamp: Timestamp);

    /// 表示名を設定する（None でクリア）
    async fn set_display_name(&self, user_id: &UserId, name: Option<DisplayName>);

    /// 存在する全ルームの (ID, スナップショット) 一覧
    async fn list_rooms(&self) -> Vec<(RoomId, RoomSnapshot)>;

    /// 接続カウンタをインクリメントし、現在の接続数を返す
    async fn register_connection(&self) -> usize;

    /// 接続カウンタをデクリメントし、現在の接続数を返す
    async fn unregister_connection(&self) -> usize;

    /// 現在の接続数（診断用）
    async fn connection_count(&self) -> usize;
}
