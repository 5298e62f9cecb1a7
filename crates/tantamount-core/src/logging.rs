//! Logging initialization
//!
//! One entry point wires up the tracing subscriber for the whole process.
//! The engine itself only emits `tracing` events; embedders decide the
//! profile once at startup.

use std::sync::Once;

use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Subscriber profile selected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output with debug-level engine events
    Development,
    /// JSON output with info-level engine events
    Production,
    /// Bare registry so tests keep stdout clean
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Install the tracing subscriber for the selected profile
///
/// Safe to call more than once; only the first call installs anything.
/// `RUST_LOG` overrides the profile's default filter when set.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        match profile {
            Profile::Development => {
                tracing_subscriber::fmt()
                    .with_env_filter(
                        EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| EnvFilter::new("tantamount=debug")),
                    )
                    .init();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(
                        EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| EnvFilter::new("tantamount=info")),
                    )
                    .init();
            }
            Profile::Test => {
                tracing_subscriber::registry().init();
            }
        }
    });
}
