//! Logging backend setup for binaries
//!
//! The library only emits through the `log` facade. Binaries pick the backend.

/// Initialize logging with a default level, still overridable by `RUST_LOG`
///
/// Unknown level names fall back to `Info`. Calling this twice is harmless;
/// the second initialisation is ignored.
pub fn init_with_level(level: &str) {
    let filter = level.parse().unwrap_or(log::LevelFilter::Info);
    let _ = env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .try_init();
}
