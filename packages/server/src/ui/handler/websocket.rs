//! WebSocket connection handlers.
//!
//! One upgraded socket is one Connection. The socket is split into a reader
//! task (inbound events) and a writer task (the connection's outbox); when
//! either ends, the other is aborted and the connection leaves its room.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use hiroba_shared::time::get_jst_timestamp;
use tokio::sync::mpsc;

use crate::{
    domain::{ChatMessage, ConnectionId, ConnectionIdFactory, RoomId, Timestamp},
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    ui::state::AppState,
    usecase::{JoinRoomUseCase, LeaveRoomUseCase, RouteMessageUseCase},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();

    // Create a channel for this connection to receive routed messages
    let (tx, mut rx) = mpsc::unbounded_channel::<ChatMessage>();
    state
        .registry
        .register(connection_id, tx, Timestamp::new(get_jst_timestamp()))
        .await;
    tracing::info!("Connection '{}' opened", connection_id);

    let (mut sender, mut receiver) = socket.split();

    // Spawn a task to receive events from this connection
    let recv_state = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => dispatch_event(&recv_state, &connection_id, &text).await,
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // Spawn a task to forward routed messages to this connection
    let mut send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let event = ServerEvent::ReceiveMessage(message.into());
            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize receive_message: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let leave_usecase = LeaveRoomUseCase::new(state.registry.clone());
    match leave_usecase.execute(&connection_id).await {
        Ok(_) => tracing::info!("Connection '{}' closed", connection_id),
        Err(e) => tracing::warn!("Failed to remove connection '{}': {}", connection_id, e),
    }
}

/// Handle one inbound text frame.
///
/// Frames that are not a well-formed event are dropped without telling the
/// client.
async fn dispatch_event(state: &AppState, connection_id: &ConnectionId, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Dropping malformed event from '{}': {}", connection_id, e);
            return;
        }
    };

    match event {
        ClientEvent::JoinRoom(room) => {
            let join_usecase = JoinRoomUseCase::new(state.registry.clone());
            if let Err(e) = join_usecase.execute(connection_id, RoomId::from(room)).await {
                tracing::warn!("Failed to join room: {}", e);
            }
        }
        ClientEvent::SendMessage(payload) => {
            let room_id = RoomId::from(payload.room);
            let message = ChatMessage::from(payload.content);
            let route_usecase = RouteMessageUseCase::new(state.registry.clone());
            route_usecase.execute(connection_id, &room_id, message).await;
        }
    }
}
