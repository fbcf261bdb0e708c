//! Error handling for Minbar
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for Minbar application
#[derive(Error, Debug)]
pub enum MinbarError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream responded with HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Result type alias for Minbar operations
pub type Result<T> = std::result::Result<T, MinbarError>;

impl MinbarError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            MinbarError::Config(_) => false,
            MinbarError::Http(_) => true,
            MinbarError::Serialization(_) => false,
            MinbarError::Io(_) => true,
            MinbarError::UrlParse(_) => false,
            MinbarError::Regex(_) => false,
            MinbarError::InvalidInput(_) => false,
            MinbarError::NotFound(_) => false,
            MinbarError::Upstream { status, .. } => *status >= 500,
            MinbarError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MinbarError::Config(_) => ErrorSeverity::Critical,
            MinbarError::Regex(_) => ErrorSeverity::Critical,
            MinbarError::InvalidInput(_) => ErrorSeverity::Info,
            MinbarError::NotFound(_) => ErrorSeverity::Info,
            MinbarError::Upstream { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
