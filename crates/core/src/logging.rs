//! Logging setup
//!
//! Everything in the crate logs through `tracing`. Hosts call [`init`] once;
//! later calls are ignored so tests and embedders can both call it freely.

use tracing_subscriber::{fmt, EnvFilter};

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to `default_filter`
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init("debug");
        init("info");
        tracing::info!("logging initialised twice without panicking");
    }
}
