//! Router construction and server entry points.

use std::{future::Future, io, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::{
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(get_rooms))
        .route("/api/rooms/{room_id}", get(get_room_detail))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Bind according to `config` and serve until Ctrl+C / SIGTERM
pub async fn run(config: ServerConfig) -> io::Result<()> {
    let listener = TcpListener::bind(config.addr()).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    tracing::info!("WebSocket endpoint: ws://{}/ws", listener.local_addr()?);

    serve(listener, Arc::new(AppState::in_memory()), shutdown_signal()).await
}
