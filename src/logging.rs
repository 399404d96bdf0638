use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "finances=warn";

/// Log to stderr so command output on stdout stays clean. `RUST_LOG`
/// overrides the default filter.
pub(crate) fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // Only fails if a subscriber is already installed
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
