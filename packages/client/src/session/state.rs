//! Observable session state: login phase and message log.

use std::sync::Arc;

use hiroba_server::{domain::ChatMessage, infrastructure::dto::websocket::ServerEvent};
use tokio::sync::watch;

/// Login phase of a [`ClientSession`](super::ClientSession)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// Name and room not submitted yet; no network activity
    #[default]
    Anonymous,
    /// Connection being opened and `join_room` being emitted
    Joining,
    /// Joined (optimistically). Left only by destroying the connection.
    InRoom,
}

/// Append-only, ordered log of received messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    entries: Vec<ChatMessage>,
}

impl MessageLog {
    pub fn append(&mut self, message: ChatMessage) {
        self.entries.push(message);
    }

    pub fn entries(&self) -> &[ChatMessage] {
        &self.entries
    }

    /// Entries appended after the first `index` ones
    pub fn since(&self, index: usize) -> &[ChatMessage] {
        self.entries.get(index..).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Snapshot published to observers of a session
#[derive(Debug, Clone, Default)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub log: MessageLog,
    /// Set once the server side of the connection has gone away
    pub closed: bool,
}

/// Inbound event handler of a session.
///
/// Holds the session's state channel rather than a copy of the log, so the
/// handler installed at connection time always appends to the live log.
#[derive(Clone)]
pub struct MessageSink {
    view: Arc<watch::Sender<SessionView>>,
}

impl MessageSink {
    pub(crate) fn new(view: Arc<watch::Sender<SessionView>>) -> Self {
        Self { view }
    }

    /// Apply one server event to the session state.
    ///
    /// Messages are appended whatever room they were sent to; the server only
    /// routes a connection the messages of the room it joined. Events are
    /// ignored while the session is still anonymous.
    pub fn deliver(&self, event: ServerEvent) {
        match event {
            ServerEvent::ReceiveMessage(content) => {
                self.view.send_if_modified(|view| {
                    if view.phase == SessionPhase::Anonymous {
                        tracing::debug!("Ignoring message received before joining");
                        return false;
                    }
                    view.log.append(ChatMessage::from(content));
                    true
                });
            }
        }
    }

    /// Record that no further events will arrive on this connection.
    pub fn mark_closed(&self) {
        self.view.send_if_modified(|view| !std::mem::replace(&mut view.closed, true));
    }
}
