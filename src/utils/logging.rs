//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Minbar application.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use crate::config::{LogFormat, LoggingConfig};
use crate::utils::errors::{ErrorSeverity, MinbarError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file appender on drop and must be held
/// for as long as the process logs.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.directory, "minbar.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let (stdout_layer, file_layer) = match config.format {
        LogFormat::Pretty => (
            tracing_subscriber::fmt::layer().with_writer(std::io::stdout).boxed(),
            tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking).boxed(),
        ),
        LogFormat::Json => (
            tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout).boxed(),
            tracing_subscriber::fmt::layer().json().with_writer(non_blocking).boxed(),
        ),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| MinbarError::Config(format!("Failed to install subscriber: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a locale redirect decision
pub fn log_redirect(path: &str, location: &str) {
    debug!(
        path = path,
        location = location,
        "Redirecting to locale-prefixed path"
    );
}

/// Log the outcome of a data fetch
pub fn log_fetch_result(endpoint: &str, filter_key: &str, sequence: u64, error: Option<&str>) {
    match error {
        None => debug!(
            endpoint = endpoint,
            filter_key = filter_key,
            sequence = sequence,
            "Fetch completed"
        ),
        Some(error) => warn!(
            endpoint = endpoint,
            filter_key = filter_key,
            sequence = sequence,
            error = error,
            "Fetch failed"
        ),
    }
}

/// Log an error surfaced by an API handler at the level its severity calls for
pub fn log_api_error(api: &str, error: &MinbarError) {
    let recoverable = error.is_recoverable();
    match error.severity() {
        ErrorSeverity::Info => debug!(api = api, error = %error, recoverable = recoverable, "API request rejected"),
        ErrorSeverity::Warning => warn!(api = api, error = %error, recoverable = recoverable, "API error occurred"),
        ErrorSeverity::Error | ErrorSeverity::Critical => {
            error!(api = api, error = %error, recoverable = recoverable, severity = %error.severity(), "API error occurred")
        }
    }
}
