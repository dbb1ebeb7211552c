//! Opt-in tracing for test diagnostics

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install an fmt subscriber honoring `RUST_LOG`, once per process.
///
/// Safe to call from every test; later calls are no-ops, including across
/// test binaries that already installed a subscriber.
pub fn init_test_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
        debug!("test tracing initialized");
    });
}
