//! CLI chat client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client -- --name Alice --room lobby
//! ```

use clap::Parser;
use hiroba_client::ClientConfig;
use hiroba_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    // Initialize tracing (quiet by default so chat output stays readable)
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let config = ClientConfig::parse();

    if let Err(e) = hiroba_client::run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
