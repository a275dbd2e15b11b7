//! Domain layer for the chat application.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, Member, Room};
pub use error::RegistryError;
pub use factory::ConnectionIdFactory;
pub use repository::{Outbox, RoomRegistry};
pub use value_object::{ConnectionId, DisplayName, MessageBody, RoomId, Timestamp};

#[cfg(test)]
pub use repository::MockRoomRegistry;
