//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ルームの暗黙的な作成、ルーム間の移動
//!
//! ### なぜこのテストが必要か
//! - 一つの接続は同時に一つのルームにしか所属できない
//! - 未登録の接続はエラーとして扱われる
//!
//! ### どのような状況を想定しているか
//! - 正常系：新しいルームへの参加
//! - 正常系：別ルームへの再参加（移動）
//! - 異常系：未登録の接続

use std::sync::Arc;

use hiroba_shared::time::get_jst_timestamp;

use crate::domain::{ConnectionId, RegistryError, RoomId, RoomRegistry, Timestamp};

use super::error::JoinRoomError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続
    /// * `room_id` - 参加先のルーム（存在しなければ作成される）
    ///
    /// # Returns
    ///
    /// * `Ok(Some(room))` - 以前所属していたルームから移動した
    /// * `Ok(None)` - 以前はどのルームにも所属していなかった（または同じルームへの再参加）
    /// * `Err(JoinRoomError)` - 参加失敗
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
    ) -> Result<Option<RoomId>, JoinRoomError> {
        let joined_at = Timestamp::new(get_jst_timestamp());

        let previous = self
            .registry
            .join(connection_id, room_id.clone(), joined_at)
            .await
            .map_err(|e| match e {
                RegistryError::ConnectionNotFound(id) => JoinRoomError::ConnectionNotRegistered(id),
            })?;

        match &previous {
            Some(previous) => tracing::info!(
                "Connection '{}' moved from room '{}' to '{}'",
                connection_id,
                previous,
                room_id
            ),
            None => tracing::info!("Connection '{}' joined room '{}'", connection_id, room_id),
        }

        Ok(previous)
    }
}
