use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber writing to stderr.
///
/// Verbosity follows `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
