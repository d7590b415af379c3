//! Tracing setup.
//!
//! The library emits `tracing` events and spans but never installs a subscriber on its
//! own. Front ends call [`init_tracing`] once at startup.

use crate::config::VaultConfig;
use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber writing to stderr, filtered by the configured
/// level. An invalid directive falls back to `info`.
///
/// Idempotent: only the first call takes effect.
pub fn init_tracing(config: &VaultConfig) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
