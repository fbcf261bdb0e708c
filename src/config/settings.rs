//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::models::locale::Direction;

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Settings {
    pub server: ServerConfig,
    pub locales: LocalesConfig,
    pub routing: RoutingConfig,
    pub data: DataConfig,
    pub api: ApiConfig,
    pub cache: CacheConfig,
    pub proxy: ProxyConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

/// One supported locale entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LocaleEntry {
    pub tag: String,
    pub direction: Direction,
}

/// Supported locales and the default one
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocalesConfig {
    pub default_locale: String,
    pub supported: Vec<LocaleEntry>,
}

/// Locale routing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Paths starting with any of these are never redirected
    pub excluded_prefixes: Vec<String>,
    /// Regular expressions matched against the whole path
    pub excluded_patterns: Vec<String>,
    /// Pick the redirect locale from `Accept-Language` instead of the default
    pub negotiate_from_header: bool,
}

/// Content data location
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    pub directory: String,
}

/// Client-side API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

/// Shared fetch cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl_seconds: u64,
}

/// Audio proxy configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub allowed_hosts: Vec<String>,
    pub timeout_seconds: u64,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
    pub format: LogFormat,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config").required(false))
    }

    /// Load settings from an explicit file plus environment variables
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path.as_ref()).required(true))
    }

    fn build(file: config::File<config::FileSourceFile, config::FileFormat>) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("MINBAR")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .with_list_parse_key("routing.excluded_prefixes")
                    .with_list_parse_key("proxy.allowed_hosts")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::MinbarError> {
        super::validation::validate_settings(self)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origins: vec![],
        }
    }
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            default_locale: "ar".to_string(),
            supported: vec![
                LocaleEntry { tag: "ar".to_string(), direction: Direction::Rtl },
                LocaleEntry { tag: "en".to_string(), direction: Direction::Ltr },
            ],
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            excluded_prefixes: [
                "/_next/",
                "/api/",
                "/static/",
                "/images/",
                "/audio/",
                "/favicon.ico",
                "/robots.txt",
                "/health",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
            excluded_patterns: vec![r"^/[^/]+\.[A-Za-z0-9]+$".to_string()],
            negotiate_from_header: false,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            directory: "data".to_string(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl_seconds: 300,
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            allowed_hosts: [
                "server7.mp3quran.net",
                "server8.mp3quran.net",
                "server11.mp3quran.net",
                "download.quranicaudio.com",
            ]
            .iter()
            .map(|h| h.to_string())
            .collect(),
            timeout_seconds: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: "logs".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.locales.default_locale, "ar");
        assert_eq!(settings.locales.supported.len(), 2);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [server]
            port = 8080

            [locales]
            default_locale = "en"
            supported = [{ tag = "en", direction = "ltr" }]
            "#,
        )
        .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.locales.default_locale, "en");
        assert_eq!(settings.logging.format, LogFormat::Pretty);
        assert!(settings.routing.excluded_prefixes.contains(&"/api/".to_string()));
    }
}
