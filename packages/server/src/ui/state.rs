//! Server state shared by the handlers.

use std::sync::Arc;

use crate::{domain::RoomRegistry, infrastructure::repository::InMemoryRoomRegistry};

/// Shared application state
pub struct AppState {
    /// Registry（データアクセス層の抽象化）
    pub registry: Arc<dyn RoomRegistry>,
}

impl AppState {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// State backed by an empty in-memory registry
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryRoomRegistry::new()))
    }
}
