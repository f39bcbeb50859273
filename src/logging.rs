use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter (`EnvFilter` syntax).
pub const LOG_ENV: &str = "NAMESPACE_CONNECT_LOG";

/// Install a stderr subscriber for connector and reducer diagnostics.
///
/// Filter comes from `NAMESPACE_CONNECT_LOG`, defaulting to `warn` so only
/// misuse warnings show. Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
