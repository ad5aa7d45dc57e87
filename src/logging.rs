//! # Logging
//!
//! The runtime emits `tracing` events and never installs a subscriber on its
//! own. Applications and tests that want console output call
//! [`init_logging`] once at startup.
//!
//! Events and their fields:
//! - `debug` per lifecycle hook (`machine`, `hook`)
//! - `info` when a transition commits (`machine`, `transition`, `from`, `to`)
//! - `warn` when a hook fails or a transition is rejected
//! - `debug`/`trace` for planner and resolver decisions
//!
//! The level comes from `RUST_LOG` and falls back to [`DEFAULT_LOG_LEVEL`].

use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const DEFAULT_LOG_LEVEL: &str = "info";

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Install a console subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once. An already-installed global subscriber is
/// left in place.
pub fn init_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_filter(env_filter()),
        );

        if subscriber.try_init().is_err() {
            tracing::debug!("global tracing subscriber already set, keeping it");
        }
    });
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_logging();
        init_logging();
        assert!(LOGGER_INITIALIZED.get().is_some());
    }
}
