//! Conversion logic between domain snapshots and DTOs.

use crate::domain::{RoomId, RoomSnapshot};
use crate::infrastructure::dto::http::{RoomDetailDto, RoomSummaryDto};
use crate::infrastructure::dto::websocket::SyncMessage;

/// スナップショットから stats メッセージを構築する
pub fn stats_message(room_id: &RoomId, snapshot: &RoomSnapshot) -> SyncMessage {
    SyncMessage::Stats {
        room: room_id.as_str().to_string(),
        users: snapshot.users.clone(),
        playing: snapshot.playing,
        seconds: snapshot.position_seconds,
        timestamp: snapshot.reference_timestamp.value(),
    }
}

/// スナップショットからルーム一覧用 DTO を構築する
pub fn room_summary(room_id: &RoomId, snapshot: &RoomSnapshot) -> RoomSummaryDto {
    RoomSummaryDto {
        id: room_id.as_str().to_string(),
        users: snapshot.users.clone(),
        playing: snapshot.playing,
    }
}

/// スナップショットからルーム詳細 DTO を構築する
pub fn room_detail(room_id: &RoomId, snapshot: &RoomSnapshot) -> RoomDetailDto {
    RoomDetailDto {
        id: room_id.as_str().to_string(),
        users: snapshot.users.clone(),
        playing: snapshot.playing,
        position_seconds: snapshot.position_seconds,
        reference_timestamp: snapshot.reference_timestamp.value(),
    }
}
