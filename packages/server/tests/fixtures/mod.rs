//! Test fixtures shared by the integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hiroba_server::ui::{serve, state::AppState};
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub const TIMEOUT: Duration = Duration::from_secs(5);

pub type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

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
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.abort();
    }
}

/// Raw WebSocket client speaking the event envelope directly
pub struct RawClient {
    stream: WsStream,
}

impl RawClient {
    pub async fn connect(server: &TestServer) -> Self {
        let (stream, _) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect");
        Self { stream }
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn join(&mut self, room: &str) {
        self.send_raw(&json!({"event": "join_room", "data": room}).to_string())
            .await;
    }

    pub async fn say(&mut self, room: &str, author: &str, message: &str) {
        let event = json!({
            "event": "send_message",
            "data": {"room": room, "content": {"author": author, "message": message}},
        });
        self.send_raw(&event.to_string()).await;
    }

    /// Next `receive_message` payload, or `None` if nothing arrives in time
    pub async fn recv_within(&mut self, wait: Duration) -> Option<Value> {
        loop {
            let frame = timeout(wait, self.stream.next()).await.ok()??.ok()?;
            if let Message::Text(text) = frame {
                let value: Value = serde_json::from_str(&text).expect("Invalid JSON from server");
                assert_eq!(value["event"], "receive_message");
                return Some(value["data"].clone());
            }
        }
    }

    pub async fn recv(&mut self) -> Value {
        self.recv_within(TIMEOUT)
            .await
            .expect("Timed out waiting for receive_message")
    }

    /// Join and wait until the server has processed the join, by sending a
    /// message to the room and waiting for its echo.
    pub async fn join_synced(&mut self, room: &str, author: &str) {
        self.join(room).await;
        self.say(room, author, "__sync__").await;
        loop {
            let data = self.recv().await;
            if data["author"] == author && data["message"] == "__sync__" {
                break;
            }
        }
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
