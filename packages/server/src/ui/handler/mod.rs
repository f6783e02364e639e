//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod websocket;

pub use http::{broadcast_message, get_or_create_room, health_check, join_room};
pub use websocket::delivery_handler;
