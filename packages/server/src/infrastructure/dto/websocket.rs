//! WebSocket wire protocol messages.
//!
//! 1 テキストフレーム = 1 JSON オブジェクトで、`type` フィールドで判別される。
//! サーバーが自分から `join` / `leave` / `play` / `pause` を発信することはない。
//! 状態遷移を適用した後にそのままルームへ中継し、続けて必ず `stats`
//! スナップショットを送る。

use serde::{Deserialize, Serialize};

/// 同期プロトコルの全メッセージ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncMessage {
    /// client→server: ルームへの参加。中継されない（後続の stats のみ）。
    Join { user: String, room: String },
    /// client→server: ルームからの退出。中継されない（後続の stats のみ）。
    Leave { user: String, room: String },
    /// client→server。状態遷移の適用後、ルームへそのまま中継される。
    Play {
        seconds: f64,
        /// 発信クライアントの壁時計（Unix ミリ秒）。サーバー時刻ではない。
        timestamp: i64,
        room: String,
        user: String,
    },
    /// client→server。状態遷移の適用後、ルームへそのまま中継される。
    Pause { room: String, user: String },
    /// client→server: 表示名の設定。`name` 省略でクリア。
    UpdateName {
        user: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// server→client のみ: 変更イベント後に再計算されたルーム状態
    Stats {
        room: String,
        users: Vec<String>,
        playing: bool,
        seconds: f64,
        timestamp: i64,
    },
}
