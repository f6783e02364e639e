//! HTTP and WebSocket server over the room manager.

mod error;
mod handler;
mod runner;
mod signal;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use runner::{build_router, run, serve};
pub use state::AppState;
