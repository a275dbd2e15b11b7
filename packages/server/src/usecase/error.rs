//! UseCase 層のエラー定義

use thiserror::Error;

/// ルーム参加のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinRoomError {
    /// 接続が Registry に登録されていない
    #[error("Connection '{0}' is not registered")]
    ConnectionNotRegistered(String),
}

/// 切断処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LeaveRoomError {
    /// 接続が既に削除されている
    #[error("Connection '{0}' is not registered")]
    ConnectionNotRegistered(String),
}
