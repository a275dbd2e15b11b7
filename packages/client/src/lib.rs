//! Room-scoped WebSocket chat client library.
//!
//! [`ClientSession`] tracks who the user is, which room they are in and the
//! messages received so far; it owns the [`connection::WsConnection`] used to
//! talk to the server.

pub mod config;
pub mod connection;
pub mod error;
pub mod runner;
pub mod session;

// Re-export entry points
pub use config::ClientConfig;
pub use runner::run_client;
pub use session::ClientSession;
