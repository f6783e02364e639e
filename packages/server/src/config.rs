//! Runtime configuration.

use std::time::Duration;

/// Default upper bound on concurrent sends during one broadcast
pub const DEFAULT_FANOUT_CONCURRENCY: usize = 16;

/// Default lifetime of a repopulated membership snapshot
pub const DEFAULT_SNAPSHOT_TTL: Duration = Duration::from_secs(300);

/// Default lifetime of a room's membership version stamp.
///
/// Outlives the snapshots tagged with it, so a snapshot normally expires
/// before its stamp does.
pub const DEFAULT_VERSION_TTL: Duration = Duration::from_secs(3600);

/// Default number of invalidation attempts in strict mode
pub const DEFAULT_INVALIDATION_ATTEMPTS: u32 = 3;

/// Behaviour knobs for [`crate::usecase::RoomManager`].
///
/// The defaults reproduce the baseline join contract: invalidation is
/// best-effort and a failed channel creation leaves the client persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomManagerConfig {
    /// Maximum in-flight sends per broadcast (values below 1 are treated as 1)
    pub fanout_concurrency: usize,
    /// Expiry passed to the cache when a snapshot is repopulated
    pub snapshot_ttl: Option<Duration>,
    /// Expiry of the membership version stamp written by join and reload
    pub version_ttl: Option<Duration>,
    /// Fail `join` if the cached snapshot cannot be invalidated
    pub strict_invalidation: bool,
    /// Invalidation attempts before giving up in strict mode
    pub invalidation_attempts: u32,
    /// Delete the client record again if channel creation fails
    pub compensate_failed_join: bool,
}

impl Default for RoomManagerConfig {
    fn default() -> Self {
        Self {
            fanout_concurrency: DEFAULT_FANOUT_CONCURRENCY,
            snapshot_ttl: Some(DEFAULT_SNAPSHOT_TTL),
            version_ttl: Some(DEFAULT_VERSION_TTL),
            strict_invalidation: false,
            invalidation_attempts: DEFAULT_INVALIDATION_ATTEMPTS,
            compensate_failed_join: false,
        }
    }
}

impl RoomManagerConfig {
    /// Fan-out limit, never zero.
    pub fn effective_fanout(&self) -> usize {
        self.fanout_concurrency.max(1)
    }

    /// Number of invalidation attempts the join path makes.
    ///
    /// Baseline mode tries exactly once.
    pub fn effective_invalidation_attempts(&self) -> u32 {
        if self.strict_invalidation {
            self.invalidation_attempts.max(1)
        } else {
            1
        }
    }
}

/// Server configuration assembled by the binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to
    pub bind_address: String,
    /// Default log level when `RUST_LOG` is not set
    pub log_level: String,
    /// Room manager behaviour
    pub manager: RoomManagerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            log_level: "info".to_string(),
            manager: RoomManagerConfig::default(),
        }
    }
}
