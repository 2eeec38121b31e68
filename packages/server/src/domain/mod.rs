//! ドメイン層
//!
//! ルーム同期エンジンの中核。エンティティ・値オブジェクトと、
//! Infrastructure 層が実装するインターフェース（Registry / Pusher）を
//! 定義します。

pub mod entity;
pub mod pusher;
pub mod repository;
pub mod snapshot;
pub mod value_object;

pub use entity::{Member, PlaybackState, Room};
pub use pusher::{MessagePusher, PusherChannel};
pub use repository::RoomRegistry;
pub use snapshot::{RoomSnapshot, build_room_snapshot};
pub use value_object::{DisplayName, RoomId, Timestamp, UserId, ValidationError};

#[cfg(test)]
pub use pusher::MockMessagePusher;
