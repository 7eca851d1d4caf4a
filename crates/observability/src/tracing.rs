//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize JSON tracing for the process.
///
/// The default filter keeps the service chatter at `info` while leaving
/// domain-level crates free to be turned up via `RUST_LOG`. Safe to call
/// multiple times (subsequent calls are no-ops), which matters for the
/// black-box tests that spawn several servers in one process.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,naycourse_infra=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(true)
        .try_init();
}
