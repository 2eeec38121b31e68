//! ドメインエンティティ
//!
//! Room（同期ルーム）とその参加メンバー、再生状態を表現します。
//! Room のミューテータは不変条件（生存メンバーの ID 一意性、
//! メンバー増減で再生状態が変わらないこと）を守る形でのみ公開されます。

use super::pusher::PusherChannel;
use super::value_object::{Timestamp, UserId};

/// ルームに参加している 1 接続
///
/// `channel` はセッションの送信キューへのハンドル。所有権はセッション側に
/// あり、Member は送信と生存確認のためだけに保持する。
#[derive(Debug, Clone)]
pub struct Member {
    pub id: UserId,
    pub channel: PusherChannel,
}

impl Member {
    pub fn new(id: UserId, channel: PusherChannel) -> Self {
        Self { id, channel }
    }

    /// 接続が生きているか
    ///
    /// 送信側チャンネルが閉じられていなければ生存とみなす。接続はイベントの
    /// 合間に非同期に閉じ得るため、毎回ハンドルから再計算する（キャッシュしない）。
    pub fn is_live(&self) -> bool {
        !self.channel.is_closed()
    }
}

/// ルームの再生状態
///
/// `reference_timestamp` は `position_seconds` が正確だった壁時計時刻
/// （Unix ミリ秒）。クライアントは
/// `position_seconds + (playing ? now - reference_timestamp : 0)` で
/// 現在位置を復元する。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub playing: bool,
    pub position_seconds: f64,
    pub reference_timestamp: Timestamp,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            playing: false,
            position_seconds: 0.0,
            reference_timestamp: Timestamp::new(0),
        }
    }
}

impl PlaybackState {
    /// play イベントを適用する
    ///
    /// `reference_timestamp` は発信クライアントが申告した時刻をそのまま使う。
    pub fn play(&mut self, position_seconds: f64, reference_timestamp: Timestamp) {
        self.playing = true;
        self.position_seconds = position_seconds;
        self.reference_timestamp = reference_timestamp;
    }

    /// pause イベントを適用する
    ///
    /// `position_seconds` は凍結済みの位置を既に反映しているため変更しない。
    /// タイムスタンプは凍結した時刻を記録する。
    pub fn pause(&mut self, reference_timestamp: Timestamp) {
        self.playing = false;
        self.reference_timestamp = reference_timestamp;
    }
}

/// 同期ルーム
///
/// メンバー列は参加順を保持する。再生状態を更新するのは play / pause のみ。
#[derive(Debug, Clone, Default)]
pub struct Room {
    pub members: Vec<Member>,
    pub playback: PlaybackState,
}

impl Room {
    pub fn new() -> Self {
        Self::default()
    }

    /// メンバーを追加する
    ///
    /// 同じ ID の生存エントリが既に存在する場合は何もしない（冪等）。
    /// 閉じた接続の同 ID エントリは再接続として新しいチャンネルに置き換わる。
    pub fn add_member(&mut self, member: Member) {
        if self
            .members
            .iter()
            .any(|m| m.id == member.id && m.is_live())
        {
            return;
        }
        self.members.retain(|m| m.id != member.id || m.is_live());
        self.members.push(member);
    }

    /// ID が一致する最初のエントリを削除する（生存状態は問わない）
    ///
    /// 残りのメンバーの相対順序は保持される。該当なしの場合は何もしない。
    pub fn remove_member(&mut self, user_id: &UserId) {
        if let Some(pos) = self.members.iter().position(|m| &m.id == user_id) {
            self.members.remove(pos);
        }
    }

    /// 生存しているメンバーの一覧（参加順）
    pub fn live_members(&self) -> Vec<Member> {
        self.members.iter().filter(|m| m.is_live()).cloned().collect()
    }

    /// 生存しているメンバー数
    pub fn live_member_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_live()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn create_test_member(id: &str) -> (Member, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let member = Member::new(UserId::new(id.to_string()).unwrap(), tx);
        (member, rx)
    }

    #[test]
    fn test_member_is_live_while_channel_open() {
        // テスト項目: チャンネルが開いている間はメンバーが生存と判定される
        // given (前提条件):
        let (member, _rx) = create_test_member("alice");

        // when (操作):
        let live = member.is_live();

        // then (期待する結果):
        assert!(live);
    }

    #[test]
    fn test_member_is_dead_after_channel_closed() {
        // テスト項目: 受信側が破棄されたメンバーは生存と判定されない
        // given (前提条件):
        let (member, rx) = create_test_member("alice");

        // when (操作): 受信側を破棄してチャンネルを閉じる
        drop(rx);

        // then (期待する結果):
        assert!(!member.is_live());
    }

    #[test]
    fn test_playback_state_default() {
        // テスト項目: 再生状態の初期値は停止・位置 0・タイムスタンプ 0
        // given (前提条件):

        // when (操作):
        let state = PlaybackState::default();

        // then (期待する結果):
        assert!(!state.playing);
        assert_eq!(state.position_seconds, 0.0);
        assert_eq!(state.reference_timestamp, Timestamp::new(0));
    }

    #[test]
    fn test_playback_state_play_then_pause() {
        // テスト項目: play で位置・時刻が更新され、pause で位置が保持される
        // given (前提条件):
        let mut state = PlaybackState::default();

        // when (操作): play を適用
        state.play(42.0, Timestamp::new(1000));

        // then (期待する結果):
        assert!(state.playing);
        assert_eq!(state.position_seconds, 42.0);
        assert_eq!(state.reference_timestamp, Timestamp::new(1000));

        // when (操作): pause を適用
        state.pause(Timestamp::new(2000));

        // then (期待する結果): 位置は pause 前の値のまま
        assert!(!state.playing);
        assert_eq!(state.position_seconds, 42.0);
        assert_eq!(state.reference_timestamp, Timestamp::new(2000));
    }

    #[test]
    fn test_add_member_is_idempotent_for_live_duplicate() {
        // テスト項目: 生存中の同 ID メンバーを追加しても数が変わらない
        // given (前提条件):
        let mut room = Room::new();
        let (alice1, _rx1) = create_test_member("alice");
        let (alice2, _rx2) = create_test_member("alice");
        room.add_member(alice1);

        // when (操作): 同じ ID で再度追加
        room.add_member(alice2);

        // then (期待する結果):
        assert_eq!(room.live_member_count(), 1);
        assert_eq!(room.members.len(), 1);
    }

    #[test]
    fn test_add_member_replaces_dead_entry_on_rejoin() {
        // テスト項目: 閉じた接続の同 ID エントリは再参加で置き換えられる
        // given (前提条件):
        let mut room = Room::new();
        let (alice_old, rx_old) = create_test_member("alice");
        room.add_member(alice_old);
        drop(rx_old);
        assert_eq!(room.live_member_count(), 0);

        // when (操作): 新しい接続で再参加
        let (alice_new, _rx_new) = create_test_member("alice");
        room.add_member(alice_new);

        // then (期待する結果): 古いエントリは残らない
        assert_eq!(room.members.len(), 1);
        assert_eq!(room.live_member_count(), 1);
    }

    #[test]
    fn test_remove_member_removes_first_match_preserving_order() {
        // テスト項目: 削除は最初に一致したエントリのみで、残りの順序は保持される
        // given (前提条件):
        let mut room = Room::new();
        let (alice, _rx1) = create_test_member("alice");
        let (bob, _rx2) = create_test_member("bob");
        let (charlie, _rx3) = create_test_member("charlie");
        room.add_member(alice);
        room.add_member(bob);
        room.add_member(charlie);

        // when (操作): bob を削除
        room.remove_member(&UserId::new("bob".to_string()).unwrap());

        // then (期待する結果):
        let ids: Vec<&str> = room.members.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["alice", "charlie"]);
    }

    #[test]
    fn test_remove_nonexistent_member_is_noop() {
        // テスト項目: 存在しないメンバーの削除は何もしない
        // given (前提条件):
        let mut room = Room::new();
        let (alice, _rx) = create_test_member("alice");
        room.add_member(alice);

        // when (操作):
        room.remove_member(&UserId::new("nonexistent".to_string()).unwrap());

        // then (期待する結果):
        assert_eq!(room.members.len(), 1);
    }

    #[test]
    fn test_membership_change_does_not_alter_playback() {
        // テスト項目: メンバーの増減では再生状態が変化しない
        // given (前提条件):
        let mut room = Room::new();
        room.playback.play(42.0, Timestamp::new(1000));
        let (alice, _rx1) = create_test_member("alice");
        let (bob, _rx2) = create_test_member("bob");
        room.add_member(alice);
        room.add_member(bob);

        // when (操作): 参加と退出を行う
        room.remove_member(&UserId::new("alice".to_string()).unwrap());

        // then (期待する結果): 再生状態は play のまま
        assert!(room.playback.playing);
        assert_eq!(room.playback.position_seconds, 42.0);
        assert_eq!(room.playback.reference_timestamp, Timestamp::new(1000));
    }

    #[test]
    fn test_live_members_filters_dead_connections() {
        // テスト項目: live_members は閉じた接続を除外する
        // given (前提条件):
        let mut room = Room::new();
        let (alice, _rx1) = create_test_member("alice");
        let (bob, rx2) = create_test_member("bob");
        room.add_member(alice);
        room.add_member(bob);

        // when (操作): bob の接続を閉じる
        drop(rx2);

        // then (期待する結果):
        let live_members = room.live_members();
        let live: Vec<&str> = live_members.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(live, vec!["alice"]);
        assert_eq!(room.live_member_count(), 1);
        // 閉じたエントリ自体は掃除されるまで残り得る
        assert_eq!(room.members.len(), 2);
    }
}
