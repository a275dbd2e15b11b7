//! インメモリ実装

mod room;

pub use room::InMemoryRoomRegistry;
