//! Server state shared across handlers.

use std::sync::Arc;

use crate::usecase::{
    BroadcastRoomStatsUseCase, ConnectSessionUseCase, DisconnectSessionUseCase,
    GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, LeaveRoomUseCase,
    PausePlaybackUseCase, StartPlaybackUseCase, UpdateDisplayNameUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectSessionUseCase（セッション接続登録のユースケース）
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// DisconnectSessionUseCase（セッション切断後始末のユースケース）
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（ルーム退出のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// StartPlaybackUseCase（再生開始のユースケース）
    pub start_playback_usecase: Arc<StartPlaybackUseCase>,
    /// PausePlaybackUseCase（一時停止のユースケース）
    pub pause_playback_usecase: Arc<PausePlaybackUseCase>,
    /// UpdateDisplayNameUseCase（表示名更新のユースケース）
    pub update_display_name_usecase: Arc<UpdateDisplayNameUseCase>,
    /// BroadcastRoomStatsUseCase（stats 配信のユースケース）
    pub broadcast_stats_usecase: Arc<BroadcastRoomStatsUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}
