//! Membership cache abstraction.
//!
//! Two keys exist per room: the snapshot itself, stored under the room name,
//! and the room's current [`MembershipVersion`](super::MembershipVersion)
//! stamp.

use std::time::Duration;

use async_trait::async_trait;

use super::{error::CacheError, value_object::RoomName};

/// Cache key of a room's membership snapshot
pub fn snapshot_key(room: &RoomName) -> &str {
    room.as_str()
}

/// Cache key of a room's membership version stamp.
///
/// Room names never contain control characters, so this cannot collide with
/// any snapshot key.
pub fn membership_version_key(room: &RoomName) -> String {
    format!("{}\u{1f}version", room.as_str())
}

/// Key-value cache over serialized membership snapshots.
///
/// The cache is never authoritative.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipCache: Send + Sync {
    /// Read a cached value.
    ///
    /// `Ok(None)` is the well-defined miss signal. Any `Err` is a backend
    /// malfunction and must not be treated as a miss.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a value, optionally expiring after `ttl`.
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>)
    -> Result<(), CacheError>;

    /// Drop a value. Idempotent: deleting an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}
