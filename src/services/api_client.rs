//! Typed client for the read endpoints
//!
//! Builds the shared HTTP client and hands out one [`DataFetcher`] per
//! consumer. Fetchers are independent unless the shared cache is enabled.

use std::time::Duration;
use reqwest::Client;
use url::Url;
use crate::config::{ApiConfig, CacheConfig};
use crate::models::{AudioLibrary, VideoLibrary};
use crate::utils::errors::{MinbarError, Result};
use super::cache::SharedCache;
use super::fetcher::DataFetcher;
use super::filters::Filters;

/// Path of the audio library endpoint
pub const AUDIO_ENDPOINT: &str = "/api/audio";
/// Path of the video library endpoint
pub const VIDEO_ENDPOINT: &str = "/api/videos";

/// Factory for typed fetchers against one server
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    audio_cache: Option<SharedCache<AudioLibrary>>,
    video_cache: Option<SharedCache<VideoLibrary>>,
}

impl ApiClient {
    /// Create a new ApiClient instance
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("Minbar/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(MinbarError::Http)?;

        let mut base_url = Url::parse(&config.base_url)?;
        // Endpoint paths resolve below the base, so it must end in `/`
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            audio_cache: None,
            video_cache: None,
        })
    }

    /// Enable the cross-fetcher cache when the configuration asks for it
    pub fn with_cache(mut self, config: &CacheConfig) -> Self {
        self.audio_cache = SharedCache::from_config(config);
        self.video_cache = SharedCache::from_config(config);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of an endpoint path, kept below any path prefix of the base
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Fetcher for `GET /api/audio` (filters: `reciter`, `surah`, `q`)
    pub fn audio_library(&self, filters: Filters) -> Result<DataFetcher<AudioLibrary>> {
        Ok(DataFetcher::with_cache(
            self.client.clone(),
            self.endpoint(AUDIO_ENDPOINT)?,
            filters,
            self.audio_cache.clone(),
        ))
    }

    /// Fetcher for `GET /api/videos` (filters: `category`, `q`)
    pub fn video_library(&self, filters: Filters) -> Result<DataFetcher<VideoLibrary>> {
        Ok(DataFetcher::with_cache(
            self.client.clone(),
            self.endpoint(VIDEO_ENDPOINT)?,
            filters,
            self.video_cache.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let config = ApiConfig {
            base_url: "http://localhost:3000".to_string(),
            timeout_seconds: 5,
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.endpoint(AUDIO_ENDPOINT).unwrap().as_str(), "http://localhost:3000/api/audio");

        let fetcher = client.video_library(Filters::new()).unwrap();
        assert_eq!(fetcher.endpoint().path(), "/api/videos");
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        for base_url in ["http://example.com/site", "http://example.com/site/"] {
            let client = ApiClient::new(&ApiConfig {
                base_url: base_url.to_string(),
                timeout_seconds: 5,
            })
            .unwrap();
            assert_eq!(
                client.endpoint(AUDIO_ENDPOINT).unwrap().as_str(),
                "http://example.com/site/api/audio"
            );
        }
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ApiConfig {
            base_url: "not a url".to_string(),
            timeout_seconds: 5,
        };
        assert!(ApiClient::new(&config).is_err());
    }
}
