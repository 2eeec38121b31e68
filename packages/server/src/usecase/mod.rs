//! UseCase 層
//!
//! 受信イベントごとの状態遷移と、それに続く通知を
//! 1 ユースケース 1 ファイルで実装します。UseCase は Registry と
//! MessagePusher の trait にのみ依存します。

mod broadcast_stats;
mod connect_session;
mod disconnect_session;
mod error;
mod get_room_detail;
mod get_rooms;
mod join_room;
mod leave_room;
mod pause_playback;
mod start_playback;
mod update_display_name;

pub use broadcast_stats::BroadcastRoomStatsUseCase;
pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use error::GetRoomDetailError;
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use pause_playback::PausePlaybackUseCase;
pub use start_playback::StartPlaybackUseCase;
pub use update_display_name::UpdateDisplayNameUseCase;
