//! UseCase: メッセージ配送処理（ファンアウト）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RouteMessageUseCase::execute() メソッド
//! - ルームの現メンバー全員（送信者を含む）への配送
//!
//! ### なぜこのテストが必要か
//! - 送信者は自分のメッセージをエコーバックで受け取ってから表示する
//! - 他のルームのメンバーには決して届かない
//!
//! ### どのような状況を想定しているか
//! - 正常系：送信者を含むメンバー全員への配送
//! - エッジケース：メンバーのいないルームへの送信（誰にも届かない、エラーなし）
//! - エッジケース：送信者が参加していないルームへの送信

use std::sync::Arc;

use crate::domain::{ChatMessage, ConnectionId, RoomId, RoomRegistry};

/// メッセージ配送のユースケース
pub struct RouteMessageUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl RouteMessageUseCase {
    /// 新しい RouteMessageUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// メッセージ配送を実行
    ///
    /// 配送は fire-and-forget です。受信側の接続が閉じていても送信者には何も返しません。
    ///
    /// # Arguments
    ///
    /// * `sender` - 送信元の接続（ログ用。送信者自身もメンバーなら配送対象に含まれる）
    /// * `room_id` - 配送先ルーム
    /// * `message` - 配送するメッセージ
    ///
    /// # Returns
    ///
    /// 実際に配送キューへ積んだ接続の ID リスト
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        room_id: &RoomId,
        message: ChatMessage,
    ) -> Vec<ConnectionId> {
        let recipients = self.registry.broadcast(room_id, &message).await;

        tracing::debug!(
            "Routed message from '{}' ({}) to {} member(s) of room '{}'",
            message.author,
            sender,
            recipients.len(),
            room_id
        );

        recipients
    }
}
