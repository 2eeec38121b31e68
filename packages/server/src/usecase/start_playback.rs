//! UseCase: 再生開始の適用と中継
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - StartPlaybackUseCase::execute() メソッド
//! - 再生状態の適用と、生存メンバーへのフレーム中継
//!
//! ### なぜこのテストが必要か
//! - 状態遷移が中継より先にレジストリへ適用されることを保証
//! - クライアント申告のタイムスタンプが補正されずに保存されることを確認
//! - 存在しないルームへの play がルームを作らないことを検証
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数人ルームでの再生開始
//! - エッジケース：存在しないルームへの play

use std::sync::Arc;

use crate::domain::{MessagePusher, RoomId, RoomRegistry, Timestamp};

/// 再生開始のユースケース
pub struct StartPlaybackUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl StartPlaybackUseCase {
    /// 新しい StartPlaybackUseCase を作成
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// play イベントを適用し、ルームの生存メンバーへ中継する
    ///
    /// `reference_timestamp` は発信クライアントが申告した壁時計であり、
    /// サーバー時刻で補正しない。全受信者が同一の目標位置を計算できる。
    /// 状態遷移はレジストリに適用された後で中継フレームが送信される。
    /// ルームが存在しない場合は状態もルームも作られず、配送先もない。
    ///
    /// # Arguments
    ///
    /// * `room_id` - 対象ルーム
    /// * `position_seconds` - 再生位置（秒）
    /// * `reference_timestamp` - 発信クライアントの Unix ミリ秒
    /// * `frame` - 中継する JSON フレーム（DTO 層で直列化済み）
    ///
    /// # Returns
    ///
    /// 配送に成功した件数
    pub async fn execute(
        &self,
        room_id: &RoomId,
        position_seconds: f64,
        reference_timestamp: Timestamp,
        frame: &str,
    ) -> usize {
        // 1. 状態遷移をレジストリに適用
        self.registry
            .set_playing(room_id, position_seconds, reference_timestamp)
            .await;

        // 2. 生存メンバーへ中継
        let targets = self.registry.live_members(room_id).await;
        self.message_pusher.broadcast(&targets, frame).await
    }
}
