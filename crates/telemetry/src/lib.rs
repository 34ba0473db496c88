//! Logging and tracing bootstrap for biblio.

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

use biblio_kernel::settings::{LogFormat, TelemetrySettings};

/// Initialize the tracing pipeline according to settings.
///
/// `RUST_LOG` takes precedence over the default `info` filter. Fails if a
/// global subscriber is already installed.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match settings.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init(),
    };

    result.map_err(|err| anyhow!("failed to initialize tracing: {err}"))?;

    tracing::debug!(format = ?settings.log_format, "tracing pipeline initialized");
    Ok(())
}
