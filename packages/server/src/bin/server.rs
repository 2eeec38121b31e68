//! WebSocket playback synchronization server.
//!
//! Relays play/pause events between clients watching the same media stream
//! and broadcasts a recomputed `stats` snapshot after every mutating event.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kotatsu-server
//! cargo run --bin kotatsu-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;

use kotatsu_server::{
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRegistry},
    ui::Server,
    usecase::{
        BroadcastRoomStatsUseCase, ConnectSessionUseCase, DisconnectSessionUseCase,
        GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, LeaveRoomUseCase,
        PausePlaybackUseCase, StartPlaybackUseCase, UpdateDisplayNameUseCase,
    },
};
use kotatsu_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "kotatsu-server")]
#[command(about = "WebSocket playback synchronization server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger("kotatsu_server", "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry
    // 2. MessagePusher / Clock
    // 3. UseCases
    // 4. Server

    // 1. Create Registry (in-memory database)
    let registry = Arc::new(InMemoryRoomRegistry::new());

    // 2. Create MessagePusher (WebSocket implementation) and server clock
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let clock = Arc::new(SystemClock);

    // 3. Create UseCases
    let connect_session_usecase = Arc::new(ConnectSessionUseCase::new(registry.clone()));
    let disconnect_session_usecase = Arc::new(DisconnectSessionUseCase::new(registry.clone()));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(registry.clone()));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(registry.clone()));
    let start_playback_usecase = Arc::new(StartPlaybackUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let pause_playback_usecase = Arc::new(PausePlaybackUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        clock,
    ));
    let update_display_name_usecase = Arc::new(UpdateDisplayNameUseCase::new(registry.clone()));
    let broadcast_stats_usecase = Arc::new(BroadcastRoomStatsUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(registry.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(registry.clone()));

    // 4. Create and run the server
    let server = Server::new(
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
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
