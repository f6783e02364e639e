//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod broadcast_message;
pub mod error;
pub mod get_or_create_room;
pub mod join_room;
pub mod room_manager;

pub use broadcast_message::{
    BroadcastMessageUseCase, BroadcastReport, DeliveryFailure, MembershipSource,
};
pub use error::{BroadcastError, JoinError};
pub use get_or_create_room::GetOrCreateRoomUseCase;
pub use join_room::JoinRoomUseCase;
pub use room_manager::RoomManager;
