//! Bidirectional event channel to the server.

use futures_util::{SinkExt, StreamExt};
use hiroba_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{error::ConnectionError, session::MessageSink};

/// Outbound half of a connection as seen by the session.
#[cfg_attr(test, mockall::automock)]
pub trait Connection: Send + Sync {
    /// Queue one event for the server. Never waits for acknowledgement.
    fn emit(&self, event: ClientEvent) -> Result<(), ConnectionError>;
}

/// WebSocket connection.
///
/// The inbound handler is installed once, when the connection is opened:
/// every `receive_message` is handed to the [`MessageSink`], and the sink is
/// marked closed when the server side goes away. Dropping the connection
/// closes the socket.
pub struct WsConnection {
    outbound: mpsc::UnboundedSender<ClientEvent>,
    reader: JoinHandle<()>,
}

impl WsConnection {
    /// Open a connection to `url` (e.g. `ws://127.0.0.1:3000/ws`).
    pub async fn open(url: &str, sink: MessageSink) -> Result<Self, ConnectionError> {
        let (stream, _response) = connect_async(url)
            .await
            .map_err(|e| ConnectionError::Handshake(Box::new(e)))?;
        tracing::info!("Connected to {}", url);

        let (mut write, mut read) = stream.split();
        let (outbound, mut rx) = mpsc::unbounded_channel::<ClientEvent>();

        // Writer: ends when the connection is dropped or the socket fails
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let json = match serde_json::to_string(&event) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::error!("Failed to serialize event: {}", e);
                        continue;
                    }
                };
                if let Err(e) = write.send(Message::Text(json.into())).await {
                    tracing::warn!("Failed to send event: {}", e);
                    return;
                }
            }
            if let Err(e) = write.close().await {
                tracing::debug!("Failed to close WebSocket: {}", e);
            }
        });

        let reader = tokio::spawn(async move {
            while let Some(frame) = read.next().await {
                match frame {
                    Ok(Message::Text(text)) => match serde_json::from_str::<ServerEvent>(&text) {
                        Ok(event) => sink.deliver(event),
                        Err(e) => tracing::warn!("Ignoring unknown event: {}", e),
                    },
                    Ok(Message::Close(_)) => {
                        tracing::info!("Server closed the connection");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!("WebSocket error: {}", e);
                        break;
                    }
                }
            }
            sink.mark_closed();
        });

        Ok(Self { outbound, reader })
    }
}

impl Connection for WsConnection {
    fn emit(&self, event: ClientEvent) -> Result<(), ConnectionError> {
        self.outbound.send(event).map_err(|_| ConnectionError::Closed)
    }
}

impl Drop for WsConnection {
    fn drop(&mut self) {
        self.reader.abort();
    }
}
