//! UseCase: 切断処理
//!
//! 明示的な退出イベントは存在せず、接続の切断だけがルームから抜ける手段です。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - 切断時のメンバーシップ削除とルームの解放
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルーム参加中の接続の切断
//! - エッジケース：ルームに参加する前に切断
//! - 異常系：既に削除された接続の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, RegistryError, RoomId, RoomRegistry};

use super::error::LeaveRoomError;

/// 切断のユースケース
pub struct LeaveRoomUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Some(room))` - 参加していたルーム
    /// * `Ok(None)` - どのルームにも参加していなかった
    /// * `Err(LeaveRoomError)` - 接続が見つからない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Option<RoomId>, LeaveRoomError> {
        let left = self
            .registry
            .leave(connection_id)
            .await
            .map_err(|e| match e {
                RegistryError::ConnectionNotFound(id) => {
                    LeaveRoomError::ConnectionNotRegistered(id)
                }
            })?;

        if let Some(room_id) = &left {
            tracing::info!("Connection '{}' left room '{}'", connection_id, room_id);
        }

        Ok(left)
    }
}
