//! Registry 実装
//!
//! - `inmemory`: HashMap をインメモリ DB として使う実装
//! - 将来的に: `redis` など（プロセスをまたぐルーム状態が必要になった場合）

pub mod inmemory;

pub use inmemory::InMemoryRoomRegistry;
