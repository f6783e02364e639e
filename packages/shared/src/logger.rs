//! Logger setup shared by the Cuddle binaries.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the fallback filter directive used when `RUST_LOG` is not set.
///
/// The binary itself, the server library and the HTTP trace layer all log at
/// `level`; everything else stays at the subscriber default.
pub fn default_directive(bin_name: &str, level: &str) -> String {
    let bin_target = bin_name.replace('-', "_");
    format!("{bin_target}={level},cuddle_server={level},tower_http={level}")
}

/// Initialize the global tracing subscriber.
///
/// # Arguments
///
/// * `bin_name` - Name of the running binary (usually `env!("CARGO_BIN_NAME")`)
/// * `level` - Default log level when `RUST_LOG` is not set
pub fn setup_logger(bin_name: &str, level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(bin_name, level)));

    // A second initialization (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init();
}
