//! Client-side session state machine.
//!
//! ```text
//! Anonymous --join--> Joining --join_room emitted--> InRoom --disconnect--> (gone)
//! ```
//!
//! Entering a room is optimistic: the session is `InRoom` as soon as
//! `join_room` has been handed to the connection, without waiting for the
//! server. Sent messages are not appended locally; they show up in the log
//! when the server echoes them back, so the sender sees the same order as
//! every other member.

mod state;

use std::sync::Arc;

use hiroba_server::{
    domain::{ChatMessage, DisplayName, MessageBody, RoomId},
    infrastructure::dto::websocket::{ClientEvent, SendMessagePayload, ServerEvent},
};
use tokio::sync::watch;

use crate::{
    connection::{Connection, WsConnection},
    error::ClientError,
};

pub use state::{MessageLog, MessageSink, SessionPhase, SessionView};

/// Who the user is for the lifetime of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub display_name: DisplayName,
}

impl ClientIdentity {
    pub fn new(display_name: DisplayName) -> Self {
        Self { display_name }
    }
}

/// One user's session: identity, current room, message log and the
/// connection that feeds it.
pub struct ClientSession<C: Connection = WsConnection> {
    view: Arc<watch::Sender<SessionView>>,
    identity: Option<ClientIdentity>,
    room: Option<RoomId>,
    connection: Option<C>,
}

impl<C: Connection> Default for ClientSession<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connection> ClientSession<C> {
    /// Create an anonymous session with an empty log
    pub fn new() -> Self {
        let (view, _) = watch::channel(SessionView::default());
        Self {
            view: Arc::new(view),
            identity: None,
            room: None,
            connection: None,
        }
    }

    /// Handler to install on the connection. Every sink shares this
    /// session's log.
    pub fn sink(&self) -> MessageSink {
        MessageSink::new(self.view.clone())
    }

    /// Enter `room` as `identity` over `connection`.
    ///
    /// Emits `join_room` and moves to `InRoom` whether or not the emit
    /// succeeded.
    pub fn enter(
        &mut self,
        identity: ClientIdentity,
        room: RoomId,
        connection: C,
    ) -> Result<(), ClientError> {
        if let (SessionPhase::InRoom, Some(current)) = (self.phase(), &self.room) {
            return Err(ClientError::AlreadyInRoom(current.to_string()));
        }

        self.set_phase(SessionPhase::Joining);
        if let Err(e) = connection.emit(ClientEvent::JoinRoom(room.as_str().to_string())) {
            tracing::warn!("Failed to emit join_room for '{}': {}", room, e);
        }

        tracing::info!("Entered room '{}' as '{}'", room, identity.display_name);
        self.identity = Some(identity);
        self.room = Some(room);
        self.connection = Some(connection);
        self.set_phase(SessionPhase::InRoom);
        Ok(())
    }

    /// Send `body` to the current room.
    ///
    /// The message is not added to the local log here; it arrives through
    /// the server's broadcast like everyone else's.
    pub fn send(&self, body: impl Into<String>) -> Result<(), ClientError> {
        let (SessionPhase::InRoom, Some(identity), Some(room), Some(connection)) = (
            self.phase(),
            &self.identity,
            &self.room,
            &self.connection,
        ) else {
            return Err(ClientError::NotInRoom);
        };

        let message = ChatMessage::new(identity.display_name.clone(), MessageBody::new(body));
        connection.emit(ClientEvent::SendMessage(SendMessagePayload {
            room: room.as_str().to_string(),
            content: message.into(),
        }))?;
        Ok(())
    }

    /// Apply an inbound event (same path as the connection's handler)
    pub fn handle_event(&self, event: ServerEvent) {
        self.sink().deliver(event);
    }

    pub fn phase(&self) -> SessionPhase {
        self.view.borrow().phase
    }

    pub fn identity(&self) -> Option<&ClientIdentity> {
        self.identity.as_ref()
    }

    pub fn room(&self) -> Option<&RoomId> {
        self.room.as_ref()
    }

    /// Snapshot of the message log
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.view.borrow().log.entries().to_vec()
    }

    /// Watch phase and log changes (for rendering)
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.view.subscribe()
    }

    /// Destroy the connection. The session and its log are gone with it;
    /// reconnecting starts a fresh session.
    pub fn disconnect(mut self) {
        if let Some(room) = &self.room {
            tracing::info!("Leaving room '{}'", room);
        }
        drop(self.connection.take());
    }

    fn set_phase(&self, phase: SessionPhase) {
        self.view.send_modify(|view| view.phase = phase);
    }
}

impl ClientSession<WsConnection> {
    /// Connect to `url` and enter `room` as `display_name`.
    pub async fn join(
        url: &str,
        display_name: DisplayName,
        room: RoomId,
    ) -> Result<Self, ClientError> {
        let mut session = Self::new();
        session.set_phase(SessionPhase::Joining);

        let connection = WsConnection::open(url, session.sink()).await?;
        session.enter(ClientIdentity::new(display_name), room, connection)?;
        Ok(session)
    }
}
