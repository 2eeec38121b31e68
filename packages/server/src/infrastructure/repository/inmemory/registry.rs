//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する RoomRegistry trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## 並行性
//!
//! 全状態を単一の `tokio::sync::Mutex` で保護する。各変更とそれに続く
//! 空ルームの掃除がロック内で完結するため、送信が発行される時点で
//! レジストリは常に整合した状態にある。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    DisplayName, Member, Room, RoomId, RoomRegistry, RoomSnapshot, Timestamp, UserId,
    build_room_snapshot,
};

/// プロセス全体の可変状態
#[derive(Debug, Default)]
struct HubState {
    /// ルーム ID → ルーム
    rooms: HashMap<RoomId, Room>,
    /// ユーザー ID → 表示名（ルーム所属とは独立、プロセス全体）
    display_names: HashMap<UserId, DisplayName>,
    /// 接続中のセッション数（診断用）
    connections: usize,
}

/// インメモリ Room Registry 実装
pub struct InMemoryRoomRegistry {
    state: Mutex<HubState>,
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HubState::default()),
        }
    }
}

impl Default for InMemoryRoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn join(&self, room_id: RoomId, member: Member) {
        let mut state = self.state.lock().await;
        state.rooms.entry(room_id).or_default().add_member(member);
    }

    async fn leave(&self, room_id: &RoomId, user_id: &UserId) {
        let mut state = self.state.lock().await;
        let Some(room) = state.rooms.get_mut(room_id) else {
            return;
        };
        room.remove_member(user_id);
        // 生存メンバーが 0 になった瞬間、同じ操作の中でルームキーを削除する
        if room.live_member_count() == 0 {
            state.rooms.remove(room_id);
        }
    }

    async fn live_member_count(&self, room_id: &RoomId) -> usize {
        let state = self.state.lock().await;
        state
            .rooms
            .get(room_id)
            .map(|room| room.live_member_count())
            .unwrap_or(0)
    }

    async fn live_members(&self, room_id: &RoomId) -> Vec<Member> {
        let state = self.state.lock().await;
        state
            .rooms
            .get(room_id)
            .map(|room| room.live_members())
            .unwrap_or_default()
    }

    async fn snapshot(&self, room_id: &RoomId) -> Option<RoomSnapshot> {
        let state = self.state.lock().await;
        state
            .rooms
            .get(room_id)
            .map(|room| build_room_snapshot(room, &state.display_names))
    }

    async fn set_playing(
        &self,
        room_id: &RoomId,
        position_seconds: f64,
        reference_timestamp: Timestamp,
    ) {
        let mut state = self.state.lock().await;
        if let Some(room) = state.rooms.get_mut(room_id) {
            room.playback.play(position_seconds, reference_timestamp);
        }
    }

    async fn set_paused(&self, room_id: &RoomId, reference_timestamp: Timestamp) {
        let mut state = self.state.lock().await;
        if let Some(room) = state.rooms.get_mut(room_id) {
            room.playback.pause(reference_timestamp);
        }
    }

    async fn set_display_name(&self, user_id: &UserId, name: Option<DisplayName>) {
        let mut state = self.state.lock().await;
        match name {
            Some(name) => {
                state.display_names.insert(user_id.clone(), name);
            }
            None => {
                state.display_names.remove(user_id);
            }
        }
    }

    async fn list_rooms(&self) -> Vec<(RoomId, RoomSnapshot)> {
        let state = self.state.lock().await;
        state
            .rooms
            .iter()
            .map(|(room_id, room)| {
                (
                    room_id.clone(),
                    build_room_snapshot(room, &state.display_names),
                )
            })
            .collect()
    }

    async fn register_connection(&self) -> usize {
        let mut state = self.state.lock().await;
        state.connections += 1;
        state.connections
    }

    async fn unregister_connection(&self) -> usize {
        let mut state = self.state.lock().await;
        state.connections = state.connections.saturating_sub(1);
        state.connections
    }

    async fn connection_count(&self) -> usize {
        let state = self.state.lock().await;
        state.connections
    }
}
