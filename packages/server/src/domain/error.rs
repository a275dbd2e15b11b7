//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to the room registry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The connection was never registered or has already left
    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),
}
