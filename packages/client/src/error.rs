//! Client error definitions.

use thiserror::Error;

/// Errors raised by a [`Connection`](crate::connection::Connection)
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Opening the WebSocket failed
    #[error("WebSocket handshake failed: {0}")]
    Handshake(#[source] Box<tokio_tungstenite::tungstenite::Error>),

    /// The channel has been closed (disconnect or network loss)
    #[error("Connection is closed")]
    Closed,
}

/// Errors surfaced by [`ClientSession`](crate::ClientSession) and the CLI
#[derive(Debug, Error)]
pub enum ClientError {
    /// `send` called before joining a room
    #[error("Not in a room: join a room before sending messages")]
    NotInRoom,

    /// `join` called on a session that is already in a room
    #[error("Already in room '{0}'")]
    AlreadyInRoom(String),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error("Failed to read input: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}
