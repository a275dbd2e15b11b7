//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod error;
pub mod join_room;
pub mod leave_room;
pub mod route_message;

pub use error::{JoinRoomError, LeaveRoomError};
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use route_message::RouteMessageUseCase;
