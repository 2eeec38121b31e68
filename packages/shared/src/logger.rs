//! Logging setup utilities for the playback synchronization server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The default filter scopes to the given crate plus `tower_http`, so request
/// traces show up alongside application logs. The log level can be overridden
/// using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `crate_name` - The crate to scope the default filter to (e.g., "kotatsu_server")
/// * `default_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use kotatsu_shared::logger::setup_logger;
///
/// setup_logger("kotatsu_server", "debug");
/// ```
pub fn setup_logger(crate_name: &str, default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}={},tower_http={}",
                    crate_name.replace("-", "_"),
                    default_level,
                    default_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
