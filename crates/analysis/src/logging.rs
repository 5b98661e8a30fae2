//! # Structured Logging
//!
//! The library crates only emit `tracing` events. Binaries and examples call
//! [`init_tracing`] once at startup to install a subscriber.
//!
//! `RUST_LOG`, when set, overrides the configured filter.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{LogFormat, LoggingConfig};
use crate::error::AnalysisError;

/// Install a global fmt subscriber.
///
/// Fails if the filter does not parse or a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), AnalysisError> {
    let directive = std::env::var("RUST_LOG").unwrap_or_else(|_| config.filter.clone());
    let filter = EnvFilter::try_new(&directive).map_err(|e| AnalysisError::Logging {
        message: format!("invalid filter '{}': {}", directive, e),
    })?;

    let layer = match config.format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(config.with_target)
            .with_filter(filter)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(config.with_target)
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(config.with_target)
            .with_filter(filter)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| AnalysisError::Logging {
            message: e.to_string(),
        })
}
