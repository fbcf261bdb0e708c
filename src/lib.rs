//! Minbar content server
//!
//! Localized (Arabic/English) Islamic media site backend. This library
//! provides the locale-prefix router and its HTTP middleware, the content
//! catalogue behind the read endpoints, and a typed data-fetch client that
//! tracks request lifecycle state for consumers of those endpoints.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routing;
pub mod server;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{MinbarError, Result};

// Re-export main components for easy access
pub use routing::{LocaleRouter, RouteDecision};
pub use services::{ApiClient, Catalog, DataFetcher, FetchState, Filters};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
