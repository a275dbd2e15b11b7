//! WebSocket event DTOs for the chat application.
//!
//! Every text frame carries one named event:
//!
//! ```text
//! {"event": "join_room",       "data": "lobby"}
//! {"event": "send_message",    "data": {"room": "lobby", "content": {"author": "Alice", "message": "hi"}}}
//! {"event": "receive_message", "data": {"author": "Alice", "message": "hi"}}
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{ChatMessage, DisplayName, MessageBody};

/// Events sent from a client to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Register the connection under a room
    JoinRoom(String),
    /// Broadcast request
    SendMessage(SendMessagePayload),
}

/// Events sent from the server to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Delivered chat message
    ReceiveMessage(MessageContentDto),
}

/// Payload of `send_message`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessagePayload {
    pub room: String,
    pub content: MessageContentDto,
}

/// Chat message as it appears on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContentDto {
    pub author: String,
    pub message: String,
}

impl From<ChatMessage> for MessageContentDto {
    fn from(message: ChatMessage) -> Self {
        Self {
            author: message.author.into_string(),
            message: message.body.into_string(),
        }
    }
}

impl From<MessageContentDto> for ChatMessage {
    fn from(dto: MessageContentDto) -> Self {
        ChatMessage::new(DisplayName::from(dto.author), MessageBody::from(dto.message))
    }
}
