//! Tracing bootstrap shared by every SHELF binary.

use anyhow::Context;
use shelf_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Build the filter from `RUST_LOG`, falling back to the configured directive.
pub fn env_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&settings.filter)
            .with_context(|| format!("invalid telemetry filter '{}'", settings.filter)),
    }
}

/// Initialize the global tracing subscriber.
///
/// Events go to stderr so command output on stdout stays machine readable.
///
/// Calling this twice is harmless; the second installation is skipped.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = env_filter(settings)?;

    let installed = match settings.log_format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if installed.is_err() {
        tracing::debug!(target: "shelf-telemetry", "subscriber already installed");
        return Ok(());
    }

    tracing::info!(
        target: "shelf-telemetry",
        format = ?settings.log_format,
        "telemetry initialized"
    );
    Ok(())
}
