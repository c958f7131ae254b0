//! `tracing` subscriber setup for hosts without their own.

use std::sync::Once;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

/// Output profile for [`init_tracing`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines.
    #[default]
    Development,
    /// One JSON object per line.
    Production,
}

impl Profile {
    const fn default_directive(self) -> &'static str {
        match self {
            Self::Development => "autolog=debug",
            Self::Production => "autolog=info",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Install a global `fmt` subscriber honoring `RUST_LOG`.
///
/// Only the first call has an effect. An already installed global
/// subscriber is left in place.
pub fn init_tracing(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_directive()));
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
        };
        if installed.is_err() {
            tracing::debug!("global tracing subscriber already set");
        }
    });
}
