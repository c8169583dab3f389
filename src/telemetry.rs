use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialise tracing output for a binary.
///
/// Honors `RUST_LOG` when set and defaults to `info` otherwise.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
