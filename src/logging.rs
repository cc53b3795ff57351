//! Logging setup for the terminal demo.
//!
//! The library only emits `tracing` events; a binary decides where they go.
//! `RUST_LOG` takes precedence over the filter passed in.

use tracing_subscriber::EnvFilter;

/// Logging could not be initialized
#[derive(Debug, thiserror::Error)]
#[error("failed to initialize logging: {0}")]
pub struct LoggingError(String);

/// Install a global `fmt` subscriber writing to stderr.
///
/// # Errors
///
/// Returns an error if the filter is malformed or a subscriber is already installed
pub fn init_logging(default_filter: &str) -> Result<(), LoggingError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter).map_err(|e| LoggingError(e.to_string()))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| LoggingError(e.to_string()))
}

/// Filter used when neither `RUST_LOG` nor the command line sets one
pub fn default_filter() -> &'static str {
    "info"
}
