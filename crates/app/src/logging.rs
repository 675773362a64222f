//! Tracing subscriber setup

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber
///
/// Filtering follows `RUST_LOG`. Calling this more than once is harmless;
/// later calls leave the first subscriber in place.
pub fn init() {
    let installed = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("Starting ClassGrid");
        crate::platform::log_platform_info();
    }
}
