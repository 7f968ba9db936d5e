//! Logging setup.

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{Result, TrackerError};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over the configured filter. Returns an error instead of
/// panicking if a global subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|e| TrackerError::Config(format!("Invalid log filter: {e}")))?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match config.format {
        LogFormat::Compact => registry
            .with(fmt::layer().with_target(false).compact())
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().with_target(false).json())
            .try_init(),
    };

    installed.map_err(|e| TrackerError::Config(format!("Logger already initialised: {e}")))
}
