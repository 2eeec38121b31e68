//! HTTP API response DTOs.

use serde::Serialize;

/// ルーム一覧の 1 エントリ
#[derive(Debug, Serialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub users: Vec<String>,
    pub playing: bool,
}

/// ルーム詳細
#[derive(Debug, Serialize)]
pub struct RoomDetailDto {
    pub id: String,
    pub users: Vec<String>,
    pub playing: bool,
    pub position_seconds: f64,
    pub reference_timestamp: i64,
}
