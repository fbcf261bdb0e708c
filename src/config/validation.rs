//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use std::collections::HashSet;
use crate::utils::errors::{MinbarError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_locales_config(&settings.locales)?;
    validate_routing_config(&settings.routing)?;
    validate_api_config(&settings.api)?;
    validate_cache_config(&settings.cache)?;
    validate_proxy_config(&settings.proxy)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(MinbarError::Config(
            "Server host is required".to_string()
        ));
    }

    Ok(())
}

/// Check that a locale tag looks like `en`, `ar` or `en-GB`
pub fn is_valid_locale_tag(tag: &str) -> bool {
    (2..=8).contains(&tag.len())
        && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !tag.starts_with('-')
        && !tag.ends_with('-')
}

/// Validate locale configuration
fn validate_locales_config(config: &super::LocalesConfig) -> Result<()> {
    if config.supported.is_empty() {
        return Err(MinbarError::Config(
            "At least one supported locale is required".to_string()
        ));
    }

    let mut seen = HashSet::new();
    for entry in &config.supported {
        if !is_valid_locale_tag(&entry.tag) {
            return Err(MinbarError::Config(
                format!("Invalid locale tag: {:?}", entry.tag)
            ));
        }
        if !seen.insert(entry.tag.as_str()) {
            return Err(MinbarError::Config(
                format!("Duplicate locale tag: {}", entry.tag)
            ));
        }
    }

    if !seen.contains(config.default_locale.as_str()) {
        return Err(MinbarError::Config(
            "Default locale must be in supported locales list".to_string()
        ));
    }

    Ok(())
}

/// Validate routing configuration
fn validate_routing_config(config: &super::RoutingConfig) -> Result<()> {
    if let Some(prefix) = config.excluded_prefixes.iter().find(|p| !p.starts_with('/')) {
        return Err(MinbarError::Config(
            format!("Excluded prefix must start with '/': {}", prefix)
        ));
    }

    for pattern in &config.excluded_patterns {
        regex::Regex::new(pattern).map_err(|e| {
            MinbarError::Config(format!("Invalid excluded pattern {:?}: {}", pattern, e))
        })?;
    }

    Ok(())
}

/// Validate client API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    url::Url::parse(&config.base_url).map_err(|e| {
        MinbarError::Config(format!("Invalid API base URL {:?}: {}", config.base_url, e))
    })?;

    if config.timeout_seconds == 0 {
        return Err(MinbarError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate cache configuration
fn validate_cache_config(config: &super::CacheConfig) -> Result<()> {
    if config.enabled && config.ttl_seconds == 0 {
        return Err(MinbarError::Config(
            "Cache TTL must be greater than 0 when the cache is enabled".to_string()
        ));
    }

    Ok(())
}

/// Validate audio proxy configuration
fn validate_proxy_config(config: &super::ProxyConfig) -> Result<()> {
    if config.timeout_seconds == 0 {
        return Err(MinbarError::Config(
            "Proxy timeout must be greater than 0".to_string()
        ));
    }

    if config.allowed_hosts.iter().any(|h| h.is_empty() || h.contains('/')) {
        return Err(MinbarError::Config(
            "Proxy allowed hosts must be bare host names".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(MinbarError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(MinbarError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if config.directory.is_empty() {
        return Err(MinbarError::Config(
            "Log directory is required".to_string()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LocaleEntry;
    use crate::models::locale::Direction;
    use assert_matches::assert_matches;

    #[test]
    fn test_locale_tag_format() {
        assert!(is_valid_locale_tag("en"));
        assert!(is_valid_locale_tag("en-GB"));
        assert!(!is_valid_locale_tag("e"));
        assert!(!is_valid_locale_tag("en_GB"));
        assert!(!is_valid_locale_tag("-en"));
        assert!(!is_valid_locale_tag("verylongtag"));
    }

    #[test]
    fn test_default_locale_must_be_supported() {
        let mut settings = Settings::default();
        settings.locales.default_locale = "fr".to_string();
        assert_matches!(validate_settings(&settings), Err(MinbarError::Config(_)));
    }

    #[test]
    fn test_duplicate_locales_rejected() {
        let mut settings = Settings::default();
        settings.locales.supported.push(LocaleEntry {
            tag: "en".to_string(),
            direction: Direction::Ltr,
        });
        let err = validate_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("Duplicate locale tag"));
    }

    #[test]
    fn test_empty_locales_rejected() {
        let mut settings = Settings::default();
        settings.locales.supported.clear();
        assert_matches!(validate_settings(&settings), Err(MinbarError::Config(_)));
    }

    #[test]
    fn test_relative_prefix_rejected() {
        let mut settings = Settings::default();
        settings.routing.excluded_prefixes.push("api/".to_string());
        assert_matches!(validate_settings(&settings), Err(MinbarError::Config(_)));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let mut settings = Settings::default();
        settings.routing.excluded_patterns.push("([unclosed".to_string());
        assert_matches!(validate_settings(&settings), Err(MinbarError::Config(_)));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert_matches!(validate_settings(&settings), Err(MinbarError::Config(_)));
    }

    #[test]
    fn test_zero_api_timeout_rejected() {
        let mut settings = Settings::default();
        settings.api.timeout_seconds = 0;
        assert_matches!(validate_settings(&settings), Err(MinbarError::Config(_)));
    }
}
