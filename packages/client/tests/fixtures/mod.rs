//! Test fixtures for client integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use hiroba_client::ClientSession;
use hiroba_server::{
    domain::{ChatMessage, DisplayName, RoomId},
    ui::{serve, state::AppState},
};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle, time::timeout};

pub const TIMEOUT: Duration = Duration::from_secs(5);

/// In-process server bound to an ephemeral port. Stops when dropped.
pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let shutdown = async move {
                let _ = shutdown_rx.await;
            };
            serve(listener, Arc::new(AppState::in_memory()), shutdown)
                .await
                .expect("Test server failed");
        });

        Self {
            addr,
            shutdown: Some(shutdown_tx),
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Join `room` as `name` and wait until the server lists `members`
    /// connections in the room.
    pub async fn join(&self, name: &str, room: &str, members: usize) -> ClientSession {
        let session = ClientSession::join(&self.ws_url(), DisplayName::new(name), RoomId::new(room))
            .await
            .expect("Failed to join");
        self.wait_for_members(room, members).await;
        session
    }

    /// Poll `/api/rooms/{room}` until it has `count` members
    pub async fn wait_for_members(&self, room: &str, count: usize) {
        let client = reqwest::Client::new();
        let url = format!("{}/api/rooms/{}", self.base_url(), room);
        timeout(TIMEOUT, async {
            loop {
                if let Ok(response) = client.get(&url).send().await
                    && response.status() == 200
                {
                    let body: serde_json::Value =
                        response.json().await.expect("Failed to parse JSON");
                    if body["members"].as_array().map(Vec::len) == Some(count) {
                        return;
                    }
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        })
        .await
        .expect("Timed out waiting for room membership");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.abort();
    }
}

/// Wait until the session's log holds at least `count` messages
pub async fn wait_for_messages(session: &ClientSession, count: usize) -> Vec<ChatMessage> {
    let mut updates = session.subscribe();
    timeout(TIMEOUT, updates.wait_for(|view| view.log.len() >= count))
        .await
        .expect("Timed out waiting for messages")
        .expect("Session state dropped");
    session.messages()
}

/// `(author, body)` pairs for compact assertions
pub fn lines(messages: &[ChatMessage]) -> Vec<(String, String)> {
    messages
        .iter()
        .map(|m| (m.author.to_string(), m.body.to_string()))
        .collect()
}
