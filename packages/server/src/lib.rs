//! Chat room membership and broadcast library.
//!
//! Rooms are created on first reference, participants join by client id,
//! and broadcasts fan a message out to every member. Membership is read
//! through a cache-aside path over the durable store and invalidated on
//! every join.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::{RoomManagerConfig, ServerConfig};
pub use ui::run as run_server;
pub use usecase::RoomManager;
