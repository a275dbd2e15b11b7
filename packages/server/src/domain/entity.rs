//! Core domain models for the chat application.

use serde::{Deserialize, Serialize};

use super::value_object::{ConnectionId, DisplayName, MessageBody, RoomId, Timestamp};

/// A chat room: a named partition of message visibility.
///
/// Rooms are created implicitly by the first join and only exist while they
/// have at least one member. No message history is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Room identifier
    pub id: RoomId,
    /// Members in join order
    pub members: Vec<Member>,
    /// Timestamp when the room was created (first join)
    pub created_at: Timestamp,
}

impl Room {
    /// Create a new empty room with the given ID and creation timestamp
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            members: Vec::new(),
            created_at,
        }
    }

    /// Add a member to the room.
    ///
    /// Adding a connection that is already a member keeps the original
    /// membership and returns `false`.
    pub fn add_member(&mut self, member: Member) -> bool {
        if self.contains(&member.connection_id) {
            return false;
        }
        self.members.push(member);
        true
    }

    /// Remove a member by connection ID, returning whether it was present
    pub fn remove_member(&mut self, connection_id: &ConnectionId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| &m.connection_id != connection_id);
        self.members.len() != before
    }

    /// Check whether the connection is a member of this room
    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.members
            .iter()
            .any(|m| &m.connection_id == connection_id)
    }

    /// Connection IDs of the current members, in join order
    pub fn member_ids(&self) -> Vec<ConnectionId> {
        self.members.iter().map(|m| m.connection_id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A connection's membership in a room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Connection that joined
    pub connection_id: ConnectionId,
    /// Timestamp when the connection joined the room
    pub joined_at: Timestamp,
}

impl Member {
    /// Create a new member
    pub fn new(connection_id: ConnectionId, joined_at: Timestamp) -> Self {
        Self {
            connection_id,
            joined_at,
        }
    }
}

/// A chat message. Immutable once created and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author's display name
    pub author: DisplayName,
    /// Message body
    pub body: MessageBody,
}

impl ChatMessage {
    /// Create a new chat message
    pub fn new(author: DisplayName, body: MessageBody) -> Self {
        Self { author, body }
    }
}
