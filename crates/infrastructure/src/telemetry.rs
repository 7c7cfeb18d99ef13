//! Tracing initialisation for hosts embedding env0.

use tracing_subscriber::{
    EnvFilter,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Errors from tracing setup.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// A global subscriber was already installed.
    #[error("failed to initialise tracing: {0}")]
    Init(#[from] TryInitError),
}

/// Installs a formatting subscriber writing to stderr, filtered by
/// `RUST_LOG` (default `info`).
///
/// # Errors
/// Returns an error if a global subscriber is already set.
pub fn init_tracing() -> Result<(), TelemetryError> {
    init_tracing_with(DEFAULT_FILTER)
}

/// Like [`init_tracing`] with a custom fallback filter.
///
/// # Errors
/// Returns an error if a global subscriber is already set.
pub fn init_tracing_with(default_filter: &str) -> Result<(), TelemetryError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}
