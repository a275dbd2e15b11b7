//! Repository trait for the room membership table.
//!
//! The UseCase layer depends on this trait; implementations live in the
//! infrastructure layer.

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use super::{ChatMessage, ConnectionId, RegistryError, Room, RoomId, Timestamp};

/// Outbound channel of one connection. Messages pushed here are written to
/// the socket by the connection's writer task.
pub type Outbox = UnboundedSender<ChatMessage>;

/// Authoritative server-side membership table.
///
/// Implementations must execute every method as one atomic step with respect
/// to the others: a `broadcast` never observes a half-applied `join` or
/// `leave`, and two broadcasts to the same room are never interleaved.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Register a newly opened connection. It belongs to no room yet.
    async fn register(&self, connection_id: ConnectionId, outbox: Outbox, connected_at: Timestamp);

    /// Put the connection in `room_id`, creating the room if needed.
    ///
    /// A connection is a member of at most one room: joining another room
    /// moves it. Returns the room it was moved out of, if any.
    async fn join(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
        joined_at: Timestamp,
    ) -> Result<Option<RoomId>, RegistryError>;

    /// Disconnect: remove the connection from its room and drop its
    /// outbox. A room left empty is deallocated. Returns the room it left.
    async fn leave(&self, connection_id: &ConnectionId) -> Result<Option<RoomId>, RegistryError>;

    /// Current members of the room, in join order. Empty if no such room.
    async fn members_of(&self, room_id: &RoomId) -> Vec<ConnectionId>;

    /// Enqueue `message` to every current member of the room.
    ///
    /// Takes the same snapshot as [`members_of`](Self::members_of) and
    /// enqueues to it inside one critical section, so no `join` or `leave`
    /// lands between lookup and delivery. Returns the connections the
    /// message was handed to; members whose outbox is already closed are
    /// skipped.
    async fn broadcast(&self, room_id: &RoomId, message: &ChatMessage) -> Vec<ConnectionId>;

    /// Snapshot of one active room
    async fn find_room(&self, room_id: &RoomId) -> Option<Room>;

    /// Snapshot of all active rooms
    async fn list_rooms(&self) -> Vec<Room>;

    /// Number of open connections, joined or not
    async fn connection_count(&self) -> usize;
}
