//! Test logging setup

use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber that writes through the test harness's captured output
///
/// Filtered by `RUST_LOG`, defaulting to `info`. Safe to call from every test;
/// only the first call installs the subscriber.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
