//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Connection identifier value object.
///
/// Identifies one bidirectional event channel (one WebSocket) for as long as
/// it stays open. A reconnecting client always gets a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Wrap an already generated UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room identifier value object.
///
/// Opaque and case-sensitive. Any string, including the empty one, names a
/// room; rooms only exist while they have members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    /// Create a new RoomId.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for RoomId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name chosen by the user when entering a room.
///
/// Not validated and not unique: two members may share a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for DisplayName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message body value object.
///
/// Carried verbatim; no size limit and no content filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn new(body: impl Into<String>) -> Self {
        Self(body.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for MessageBody {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for MessageBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds (JST).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp from Unix milliseconds.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_displays_as_uuid() {
        // テスト項目: ConnectionId は内部の UUID と同じ文字列で表示される
        // given (前提条件):
        let uuid = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();

        // when (操作):
        let connection_id = ConnectionId::from_uuid(uuid);

        // then (期待する結果):
        assert_eq!(connection_id.as_uuid(), &uuid);
        assert_eq!(connection_id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn test_room_id_is_case_sensitive() {
        // テスト項目: RoomId は大文字小文字を区別する
        // given (前提条件):
        let lower = RoomId::new("lobby");
        let upper = RoomId::new("Lobby");

        // then (期待する結果):
        assert_ne!(lower, upper);
        assert_eq!(lower, RoomId::from("lobby".to_string()));
    }

    #[test]
    fn test_room_id_accepts_empty_string() {
        // テスト項目: 空文字列も RoomId として扱える（形式制約なし）
        // when (操作):
        let room_id = RoomId::new("");

        // then (期待する結果):
        assert_eq!(room_id.as_str(), "");
    }

    #[test]
    fn test_display_name_is_not_unique() {
        // テスト項目: 同じ表示名を持つ DisplayName は等価
        // given (前提条件):
        let first = DisplayName::new("Alice");
        let second = DisplayName::from("Alice".to_string());

        // then (期待する結果):
        assert_eq!(first, second);
        assert_eq!(first.to_string(), "Alice");
    }

    #[test]
    fn test_message_body_is_kept_verbatim() {
        // テスト項目: メッセージ本文は加工されずに保持される
        // given (前提条件):
        let raw = "  hi\nthere  ";

        // when (操作):
        let body = MessageBody::new(raw);

        // then (期待する結果):
        assert_eq!(body.as_str(), raw);
        assert_eq!(body.into_string(), raw.to_string());
    }

    #[test]
    fn test_timestamp_ordering() {
        // テスト項目: タイムスタンプは順序付けできる
        // given (前提条件):
        let ts1 = Timestamp::new(1000);
        let ts2 = Timestamp::new(2000);

        // then (期待する結果):
        assert!(ts1 < ts2);
        assert_eq!(ts2.value(), 2000);
    }
}
