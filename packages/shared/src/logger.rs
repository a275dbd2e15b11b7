//! Logging setup shared by the server and client binaries.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence. Without it, the binary's own crate, the
/// Hiroba library crates and `tower_http` log at `default_level`.
///
/// # Arguments
///
/// * `bin_name` - Binary name (usually `env!("CARGO_BIN_NAME")`)
/// * `default_level` - Level used when `RUST_LOG` is not set (e.g. `"debug"`)
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(bin_name, default_level)));

    // try_init: a second call (e.g. from tests) keeps the first subscriber
    match tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
    {
        Ok(()) => tracing::debug!("Logger initialized for '{}'", bin_name),
        Err(e) => tracing::debug!("Logger already initialized, keeping it: {}", e),
    }
}

fn default_directives(bin_name: &str, default_level: &str) -> String {
    let bin_target = bin_name.replace('-', "_");
    format!(
        "{bin_target}={default_level},hiroba_server={default_level},hiroba_client={default_level},tower_http={default_level}"
    )
}
