//! Tracing subscriber setup.
//!
//! Filter comes from `RUST_LOG` (default `info`). Output always goes to
//! stderr so the chat transcript on stdout stays clean.

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;
use crate::error::AppError;

const SERVICE_NAME: &str = "javabuddy";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Fails if one is already set.
pub fn init_tracing(format: LogFormat) -> Result<(), AppError> {
    let registry = tracing_subscriber::registry().with(env_filter());

    let result = match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(
                SERVICE_NAME.to_string(),
                std::io::stderr,
            ))
            .try_init(),
    };

    result.map_err(|e| AppError::Config(format!("tracing already initialized: {}", e)))?;
    tracing::debug!(?format, "Tracing initialized");
    Ok(())
}
