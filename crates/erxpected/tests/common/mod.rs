//! Shared helpers for the integration tests

use std::sync::Once;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

static INIT: Once = Once::new();

/// Initialize test logging (called once per test binary)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("debug"))
            .unwrap_or_else(|_| EnvFilter::new("info"));
        let layer = fmt::layer().with_target(true).with_test_writer();
        let _ = tracing::subscriber::set_global_default(Registry::default().with(filter).with(layer));
    });
}
