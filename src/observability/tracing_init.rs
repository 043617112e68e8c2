//! Tracing subscriber initialization. A trimmed-down version of the
//! teacher's `observability::tracing_init::init_tracing`: same `EnvFilter` +
//! format-layer shape, without the OTLP exporter or SIEM layers the teacher
//! carries for its own gateway-audit concerns.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, ObservabilityConfig};

#[derive(Debug, Error)]
pub enum TracingError {
    #[error("failed to install global tracing subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Dropping this guard has no effect; it exists so callers have a single
/// RAII handle to hold onto, matching the shape of the teacher's
/// `TracingGuard` (there it also flushes an OTLP exporter on drop).
pub struct TracingGuard;

pub fn init_tracing(config: &ObservabilityConfig) -> Result<TracingGuard, TracingError> {
    let filter = EnvFilter::try_new(&config.logging.level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match config.logging.format {
        LogFormat::Pretty => {
            let fmt_layer = tracing_subscriber::fmt::layer().pretty();
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Compact => {
            let fmt_layer = tracing_subscriber::fmt::layer().compact();
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer().json();
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(TracingGuard)
}
