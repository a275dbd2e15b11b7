//! Client configuration.

use clap::Parser;

/// CLI chat client for Hiroba
#[derive(Debug, Clone, Parser)]
#[command(name = "hiroba-client", version, about)]
pub struct ClientConfig {
    /// WebSocket endpoint of the server
    #[arg(long, default_value = "ws://127.0.0.1:3000/ws")]
    pub url: String,

    /// Display name (prompted when omitted)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Room to join (prompted when omitted)
    #[arg(short, long)]
    pub room: Option<String>,
}
