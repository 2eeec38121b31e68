//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RoomId,
    infrastructure::dto::{
        conversion::{room_detail, room_summary},
        http::{RoomDetailDto, RoomSummaryDto},
    },
    ui::state::AppState,
    usecase::GetRoomDetailError,
};

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let connections = state.connect_session_usecase.connection_count().await;
    Json(serde_json::json!({"status": "ok", "connections": connections}))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let summaries: Vec<RoomSummaryDto> = rooms
        .iter()
        .map(|(room_id, snapshot)| room_summary(room_id, snapshot))
        .collect();

    Json(summaries)
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    // Convert String -> RoomId (Domain Model)
    let room_id = match RoomId::try_from(room_id) {
        Ok(room_id) => room_id,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };

    match state.get_room_detail_usecase.execute(&room_id).await {
        Ok(snapshot) => Ok(Json(room_detail(&room_id, &snapshot))),
        Err(GetRoomDetailError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
    }
}
