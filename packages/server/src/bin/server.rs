//! Cuddle room server.
//!
//! Serves room creation, join and broadcast over HTTP, backed by the
//! in-memory store, cache and delivery channel.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin cuddle-server -- --bind 0.0.0.0:8080
//! ```

use std::time::Duration;

use clap::Parser;
use cuddle_server::{RoomManagerConfig, ServerConfig, config::DEFAULT_FANOUT_CONCURRENCY};
use cuddle_shared::logger::setup_logger;

/// Cuddle room server
#[derive(Parser, Debug)]
#[command(name = "cuddle-server")]
#[command(about = "Chat room membership and broadcast server")]
#[command(version)]
struct Args {
    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    bind: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Maximum concurrent sends per broadcast
    #[arg(long, default_value_t = DEFAULT_FANOUT_CONCURRENCY)]
    fanout_concurrency: usize,

    /// Lifetime of a cached membership snapshot in seconds (0 disables expiry)
    #[arg(long, default_value_t = 300)]
    snapshot_ttl_secs: u64,

    /// Lifetime of a room's membership version stamp in seconds (0 disables expiry)
    #[arg(long, default_value_t = 3600)]
    version_ttl_secs: u64,

    /// Fail a join when the membership snapshot cannot be invalidated
    #[arg(long)]
    strict_invalidation: bool,

    /// Remove the client record again when channel creation fails
    #[arg(long)]
    compensate_failed_join: bool,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        let snapshot_ttl =
            (args.snapshot_ttl_secs > 0).then(|| Duration::from_secs(args.snapshot_ttl_secs));
        let version_ttl =
            (args.version_ttl_secs > 0).then(|| Duration::from_secs(args.version_ttl_secs));
        Self {
            bind_address: args.bind,
            log_level: args.log_level,
            manager: RoomManagerConfig {
                fanout_concurrency: args.fanout_concurrency,
                snapshot_ttl,
                version_ttl,
                strict_invalidation: args.strict_invalidation,
                compensate_failed_join: args.compensate_failed_join,
                ..Default::default()
            },
        }
    }
}

#[tokio::main]
async fn main() {
    let config = ServerConfig::from(Args::parse());

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);
    tracing::debug!("Starting with {:?}", config);

    // Run the server
    if let Err(e) = cuddle_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
