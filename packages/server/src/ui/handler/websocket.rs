//! WebSocket connection handlers.
//!
//! 1 接続 = 1 Connection Session。セッションはこの接続が自認する
//! user / room を追跡し、ハートビートを送り、切断時の後始末
//! （表示名の解放・ルームからの退出・カウンタ減算）を保証する。

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::{Mutex, mpsc};
use uuid::Uuid;

use crate::{
    domain::{DisplayName, Member, PusherChannel, RoomId, Timestamp, UserId},
    infrastructure::dto::websocket::SyncMessage,
    ui::state::AppState,
};

/// ハートビート（プロトコルレベル Ping）の送信間隔
///
/// 中継網がアイドル接続を落とすのを防ぎ、死んだピアを TCP タイムアウト
/// より早く検出する。
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);

/// セッションローカルの可変状態
///
/// この接続が自認している user と room。受信タスクが更新し、
/// 切断ハンドラが読む。
#[derive(Debug, Default)]
struct SessionState {
    user: Option<UserId>,
    room: Option<RoomId>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the session's outbound queue into the WebSocket
/// sender and emits the liveness heartbeat.
///
/// 送信キューが閉じるか、ソケットへの書き込みが失敗した時点で終了する。
/// ハートビートはこのタスクと共に停止する（切断時にちょうど 1 回）。
///
/// # Arguments
///
/// * `rx` - Channel receiver for frames addressed to this client
/// * `sender` - WebSocket sink to send frames to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut heartbeat = tokio::time::interval(HEARTBEAT_INTERVAL);
        loop {
            tokio::select! {
                msg = rx.recv() => {
                    let Some(msg) = msg else { break };
                    if sender.send(Message::Text(msg.into())).await.is_err() {
                        break;
                    }
                }
                _ = heartbeat.tick() => {
                    if sender.send(Message::Ping(Bytes::new())).await.is_err() {
                        break;
                    }
                }
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let session_id = Uuid::new_v4();
    let connections = state.connect_session_usecase.execute().await;
    tracing::info!(
        "Session {} opened ({} active connections)",
        session_id,
        connections
    );

    // このセッションの送信キュー。クローンが Member としてレジストリに渡り、
    // 生存確認にも使われる。
    let (tx, rx) = mpsc::unbounded_channel::<String>();

    let (sender, mut receiver) = socket.split();

    // Spawn a task to push queued frames (and heartbeats) to this client
    let mut send_task = pusher_loop(rx, sender);

    let session = Arc::new(Mutex::new(SessionState::default()));

    // Spawn a task to receive events from this client
    let session_recv = session.clone();
    let state_recv = state.clone();
    let tx_recv = tx.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!("Session {} socket error: {}", session_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_event(&state_recv, &session_recv, &tx_recv, session_id, text.as_str())
                        .await;
                }
                Message::Ping(_) => {
                    // Ping への Pong 応答は axum が処理する
                    tracing::trace!("Session {} received ping", session_id);
                }
                Message::Pong(_) => {
                    tracing::trace!("Session {} received pong", session_id);
                }
                Message::Close(_) => {
                    tracing::info!("Session {} requested close", session_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // 切断時の後始末。graceful close でも異常切断でも同じ経路を通る。
    let (user, room) = {
        let mut session = session.lock().await;
        (session.user.take(), session.room.take())
    };
    let affected = state.disconnect_session_usecase.execute(user, room).await;
    if let Some(room_id) = affected {
        // 退出でルームが消えていれば no-op になる
        state.broadcast_stats_usecase.execute(&room_id).await;
    }
    tracing::info!("Session {} closed", session_id);
}

/// 受信したテキストフレームを 1 イベントとして処理する
///
/// 解釈できないペイロードは無視される（致命的ではない）。セッションは
/// 動き続け、応答は返さない。変更イベントの処理後は、そのイベントが
/// 実際に影響を与えたルームへ stats を配信する。
async fn handle_event(
    state: &Arc<AppState>,
    session: &Arc<Mutex<SessionState>>,
    tx: &PusherChannel,
    session_id: Uuid,
    text: &str,
) {
    let event = match serde_json::from_str::<SyncMessage>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(
                "Session {} sent undecodable frame, ignoring: {}",
                session_id,
                e
            );
            return;
        }
    };

    match &event {
        SyncMessage::Join { user, room } => {
            let (user_id, room_id) =
                match (UserId::new(user.clone()), RoomId::new(room.clone())) {
                    (Ok(user_id), Ok(room_id)) => (user_id, room_id),
                    _ => {
                        tracing::warn!(
                            "Session {} sent join with empty user/room, ignoring",
                            session_id
                        );
                        return;
                    }
                };

            let member = Member::new(user_id.clone(), tx.clone());
            state
                .join_room_usecase
                .execute(room_id.clone(), member)
                .await;

            {
                let mut session = session.lock().await;
                session.user = Some(user_id);
                session.room = Some(room_id.clone());
            }

            state.broadcast_stats_usecase.execute(&room_id).await;
        }
        SyncMessage::Leave { user, room } => {
            let (user_id, room_id) =
                match (UserId::new(user.clone()), RoomId::new(room.clone())) {
                    (Ok(user_id), Ok(room_id)) => (user_id, room_id),
                    _ => {
                        tracing::warn!(
                            "Session {} sent leave with empty user/room, ignoring",
                            session_id
                        );
                        return;
                    }
                };

            state.leave_room_usecase.execute(&room_id, &user_id).await;

            // 追跡中のルームは stats 配信の前に外れる。stats はイベントが
            // 明示したルーム（実際に影響を受けたルーム）へ送る。
            {
                let mut session = session.lock().await;
                if session.room.as_ref() == Some(&room_id) {
                    session.room = None;
                }
            }

            state.broadcast_stats_usecase.execute(&room_id).await;
        }
        SyncMessage::Play {
            seconds,
            timestamp,
            room,
            user,
        } => {
            let room_id = match RoomId::new(room.clone()) {
                Ok(room_id) => room_id,
                Err(_) => {
                    tracing::warn!(
                        "Session {} sent play with empty room, ignoring",
                        session_id
                    );
                    return;
                }
            };

            // 中継フレームは受信した内容をそのまま再直列化する
            let frame = match serde_json::to_string(&event) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::error!("Failed to serialize play relay: {}", e);
                    return;
                }
            };

            tracing::info!("'{}' play at {}s in '{}'", user, seconds, room_id.as_str());
            state
                .start_playback_usecase
                .execute(&room_id, *seconds, Timestamp::new(*timestamp), &frame)
                .await;

            state.broadcast_stats_usecase.execute(&room_id).await;
        }
        SyncMessage::Pause { room, user } => {
            let room_id = match RoomId::new(room.clone()) {
                Ok(room_id) => room_id,
                Err(_) => {
                    tracing::warn!(
                        "Session {} sent pause with empty room, ignoring",
                        session_id
                    );
                    return;
                }
            };

            let frame = match serde_json::to_string(&event) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::error!("Failed to serialize pause relay: {}", e);
                    return;
                }
            };

            tracing::info!("'{}' paused '{}'", user, room_id.as_str());
            state.pause_playback_usecase.execute(&room_id, &frame).await;

            state.broadcast_stats_usecase.execute(&room_id).await;
        }
        SyncMessage::UpdateName { user, name } => {
            let user_id = match UserId::new(user.clone()) {
                Ok(user_id) => user_id,
                Err(_) => {
                    tracing::warn!(
                        "Session {} sent update_name with empty user, ignoring",
                        session_id
                    );
                    return;
                }
            };

            let display_name = match name {
                Some(name) => match DisplayName::new(name.clone()) {
                    Ok(display_name) => Some(display_name),
                    Err(_) => {
                        tracing::warn!(
                            "Session {} sent update_name with empty name, ignoring",
                            session_id
                        );
                        return;
                    }
                },
                None => None,
            };

            state
                .update_display_name_usecase
                .execute(&user_id, display_name)
                .await;

            // 名前だけ設定したセッションでも切断時に解放できるよう user を追跡する
            let mut session = session.lock().await;
            session.user = Some(user_id);
        }
        SyncMessage::Stats { .. } => {
            // stats はサーバー発のみ。クライアントから届いた場合は無視する。
            tracing::debug!(
                "Session {} sent server-only stats frame, ignoring",
                session_id
            );
        }
    }
}
