//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{CacheError, ChannelError, StoreError};

/// Errors from joining a room
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// The client record could not be persisted; nothing else happened
    #[error("failed to persist client: {0}")]
    Store(#[from] StoreError),

    /// The delivery channel could not be established
    #[error("failed to establish delivery channel: {0}")]
    Channel(#[from] ChannelError),

    /// The cached membership snapshot could not be invalidated (strict mode only)
    #[error("failed to invalidate membership snapshot: {0}")]
    Invalidation(#[source] CacheError),
}

/// Errors from broadcasting to a room.
///
/// Delivery failures to individual members are never reported here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BroadcastError {
    /// The cache malfunctioned (distinct from a miss)
    #[error("failed to read membership snapshot: {0}")]
    Cache(#[from] CacheError),

    /// Reloading membership from the store failed
    #[error("failed to load membership: {0}")]
    Store(#[from] StoreError),
}
