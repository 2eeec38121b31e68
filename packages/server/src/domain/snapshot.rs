//! ルームスナップショット構築
//!
//! 副作用のない純粋な構築ロジック。Registry 実装とテストから利用されます。

use std::collections::HashMap;

use super::entity::Room;
use super::value_object::{DisplayName, Timestamp, UserId};

/// ブロードキャスト用に再計算されたルームの状態
///
/// すべての変更イベントの後に配信され、途中のメッセージを取りこぼした
/// クライアントもこの値で再収束する。
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSnapshot {
    /// 生存メンバーの表示名（未設定ならユーザー ID）。参加順。
    pub users: Vec<String>,
    pub playing: bool,
    pub position_seconds: f64,
    pub reference_timestamp: Timestamp,
}

/// Room とプロセス全体の表示名テーブルからスナップショットを構築する
///
/// 生存していないメンバーは含まれない。
pub fn build_room_snapshot(
    room: &Room,
    display_names: &HashMap<UserId, DisplayName>,
) -> RoomSnapshot {
    let users = room
        .members
        .iter()
        .filter(|m| m.is_live())
        .map(|m| match display_names.get(&m.id) {
            Some(name) => name.as_str().to_string(),
            None => m.id.as_str().to_string(),
        })
        .collect();

    RoomSnapshot {
        users,
        playing: room.playback.playing,
        position_seconds: room.playback.position_seconds,
        reference_timestamp: room.playback.reference_timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Member;
    use tokio::sync::mpsc;

    fn create_test_member(id: &str) -> (Member, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let member = Member::new(UserId::new(id.to_string()).unwrap(), tx);
        (member, rx)
    }

    #[test]
    fn test_snapshot_of_empty_room_uses_playback_defaults() {
        // テスト項目: 空のルームから初期状態のスナップショットが構築される
        // given (前提条件):
        let room = Room::new();
        let names = HashMap::new();

        // when (操作):
        let snapshot = build_room_snapshot(&room, &names);

        // then (期待する結果):
        assert!(snapshot.users.is_empty());
        assert!(!snapshot.playing);
        assert_eq!(snapshot.position_seconds, 0.0);
        assert_eq!(snapshot.reference_timestamp, Timestamp::new(0));
    }

    #[test]
    fn test_snapshot_lists_live_members_in_join_order() {
        // テスト項目: users は生存メンバーを参加順で列挙する
        // given (前提条件):
        let mut room = Room::new();
        let (charlie, _rx1) = create_test_member("charlie");
        let (alice, _rx2) = create_test_member("alice");
        room.add_member(charlie);
        room.add_member(alice);
        let names = HashMap::new();

        // when (操作):
        let snapshot = build_room_snapshot(&room, &names);

        // then (期待する結果): ソートではなく参加順
        assert_eq!(snapshot.users, vec!["charlie", "alice"]);
    }

    #[test]
    fn test_snapshot_excludes_dead_members() {
        // テスト項目: 閉じた接続のメンバーは users に含まれない
        // given (前提条件):
        let mut room = Room::new();
        let (alice, _rx1) = create_test_member("alice");
        let (bob, rx2) = create_test_member("bob");
        room.add_member(alice);
        room.add_member(bob);
        drop(rx2);
        let names = HashMap::new();

        // when (操作):
        let snapshot = build_room_snapshot(&room, &names);

        // then (期待する結果):
        assert_eq!(snapshot.users, vec!["alice"]);
    }

    #[test]
    fn test_snapshot_resolves_display_names() {
        // テスト項目: 表示名が設定されていればユーザー ID の代わりに使われる
        // given (前提条件):
        let mut room = Room::new();
        let (alice, _rx1) = create_test_member("alice");
        let (bob, _rx2) = create_test_member("bob");
        room.add_member(alice);
        room.add_member(bob);

        let mut names = HashMap::new();
        names.insert(
            UserId::new("alice".to_string()).unwrap(),
            DisplayName::new("Alice the Great".to_string()).unwrap(),
        );

        // when (操作):
        let snapshot = build_room_snapshot(&room, &names);

        // then (期待する結果): alice のみ表示名、bob は ID のまま
        assert_eq!(snapshot.users, vec!["Alice the Great", "bob"]);
    }

    #[test]
    fn test_snapshot_reflects_playback_state() {
        // テスト項目: スナップショットが現在の再生状態を反映する
        // given (前提条件):
        let mut room = Room::new();
        let (alice, _rx) = create_test_member("alice");
        room.add_member(alice);
        room.playback.play(42.5, Timestamp::new(1000));
        let names = HashMap::new();

        // when (操作):
        let snapshot = build_room_snapshot(&room, &names);

        // then (期待する結果):
        assert!(snapshot.playing);
        assert_eq!(snapshot.position_seconds, 42.5);
        assert_eq!(snapshot.reference_timestamp, Timestamp::new(1000));
    }
}
