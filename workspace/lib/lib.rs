//! Shared machinery for the driver binaries: configuration, initial states,
//! vortex imprinting, time-stepping loops, and `.npz` output.

pub mod config;
pub mod data;
pub mod driver;
pub mod initial;
pub mod phase;

/// Initialize logging from `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}
