//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    BroadcastRoomStatsUseCase, ConnectSessionUseCase, DisconnectSessionUseCase,
    GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, LeaveRoomUseCase,
    PausePlaybackUseCase, StartPlaybackUseCase, UpdateDisplayNameUseCase,
};

use super::{
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket playback sync server
///
/// This struct encapsulates the server configuration and provides methods to
/// run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_session_usecase,
///     disconnect_session_usecase,
///     // ...
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// ConnectSessionUseCase（セッション接続登録のユースケース）
    connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// DisconnectSessionUseCase（セッション切断後始末のユースケース）
    disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（ルーム退出のユースケース）
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// StartPlaybackUseCase（再生開始のユースケース）
    start_playback_usecase: Arc<StartPlaybackUseCase>,
    /// PausePlaybackUseCase（一時停止のユースケース）
    pause_playback_usecase: Arc<PausePlaybackUseCase>,
    /// UpdateDisplayNameUseCase（表示名更新のユースケース）
    update_display_name_usecase: Arc<UpdateDisplayNameUseCase>,
    /// BroadcastRoomStatsUseCase（stats 配信のユースケース）
    broadcast_stats_usecase: Arc<BroadcastRoomStatsUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}

impl Server {
    /// Create a new Server instance
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        connect_session_usecase: Arc<ConnectSessionUseCase>,
        disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        start_playback_usecase: Arc<StartPlaybackUseCase>,
        pause_playback_usecase: Arc<PausePlaybackUseCase>,
        update_display_name_usecase: Arc<UpdateDisplayNameUseCase>,
        broadcast_stats_usecase: Arc<BroadcastRoomStatsUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    ) -> Self {
        Self {
            connect_session_usecase,
            disconnect_session_usecase,
            join_room_usecase,
            leave_room_usecase,
            start_playback_usecase,
            pause_playback_usecase,
            update_display_name_usecase,
            broadcast_stats_usecase,
            get_rooms_usecase,
            get_room_detail_usecase,
        }
    }

    /// Build the axum router backed by this server's state.
    ///
    /// Public so integration tests can serve the app on an ephemeral port.
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_session_usecase: self.connect_session_usecase,
            disconnect_session_usecase: self.disconnect_session_usecase,
            join_room_usecase: self.join_room_usecase,
            leave_room_usecase: self.leave_room_usecase,
            start_playback_usecase: self.start_playback_usecase,
            pause_playback_usecase: self.pause_playback_usecase,
            update_display_name_usecase: self.update_display_name_usecase,
            broadcast_stats_usecase: self.broadcast_stats_usecase,
            get_rooms_usecase: self.get_rooms_usecase,
            get_room_detail_usecase: self.get_room_detail_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_id}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Playback sync server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
