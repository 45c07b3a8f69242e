//! Telemetry helpers for structured logging and tracing.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the facility's log filter directives.
pub const LOG_ENV: &str = "PARKING_FACILITY_LOG";

/// Initialize tracing. Users can install their own subscriber; this helper
/// installs a default fmt subscriber if none is set.
///
/// Filter directives come from `PARKING_FACILITY_LOG`, then `RUST_LOG`, then `info`.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
