//! Room-scoped WebSocket chat server library.
//!
//! Clients join named rooms over a WebSocket and every message sent to a
//! room is broadcast to all of its current members, the sender included.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::run;
