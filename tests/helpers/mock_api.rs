//! Mock content API server for testing
//!
//! This module provides a mock HTTP server that simulates the read endpoints
//! for data-fetch client tests. It uses wiremock to create configurable mock
//! responses.

use std::time::Duration;
use serde_json::{json, Value};
use url::Url;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// Mock content API server
pub struct MockApiServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub status: u16,
    pub delay_ms: Option<u64>,
    pub body: Value,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            status: 200,
            delay_ms: None,
            body: audio_library_json(&["t1"]),
        }
    }
}

impl MockResponseConfig {
    pub fn ok(body: Value) -> Self {
        Self {
            body,
            ..Default::default()
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            delay_ms: None,
            body: json!({ "error": "Internal Server Error" }),
        }
    }

    pub fn delayed(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    fn template(&self) -> ResponseTemplate {
        let mut response = ResponseTemplate::new(self.status).set_body_json(self.body.clone());
        if let Some(delay) = self.delay_ms {
            response = response.set_delay(Duration::from_millis(delay));
        }
        response
    }
}

impl MockApiServer {
    /// Create a new mock API server
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn base_url(&self) -> Url {
        Url::parse(&self.server.uri()).expect("mock server URI is a valid URL")
    }

    pub fn endpoint(&self, endpoint_path: &str) -> Url {
        self.base_url().join(endpoint_path).expect("valid endpoint path")
    }

    /// Respond to every GET on `endpoint_path`
    pub async fn mock_endpoint(&self, endpoint_path: &str, config: MockResponseConfig) {
        Mock::given(method("GET"))
            .and(path(endpoint_path))
            .respond_with(config.template())
            .mount(&self.server)
            .await;
    }

    /// Respond to GETs on `endpoint_path` carrying `key=value`
    pub async fn mock_endpoint_with_param(
        &self,
        endpoint_path: &str,
        key: &str,
        value: &str,
        config: MockResponseConfig,
    ) {
        Mock::given(method("GET"))
            .and(path(endpoint_path))
            .and(query_param(key, value))
            .respond_with(config.template())
            .mount(&self.server)
            .await;
    }

    /// Query strings of all requests received so far, in arrival order
    pub async fn received_queries(&self) -> Vec<Option<String>> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| request.url.query().map(str::to_string))
            .collect()
    }

    pub async fn request_count(&self) -> usize {
        self.received_queries().await.len()
    }

    /// Reset all mocks
    pub async fn reset(&self) {
        self.server.reset().await;
    }
}

/// Audio library body with one track per id and empty reciter/surah lists
pub fn audio_library_json(track_ids: &[&str]) -> Value {
    let tracks: Vec<Value> = track_ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "reciter_id": "r1",
                "surah_id": "surah-1",
                "title": format!("Track {}", id),
                "url": format!("https://example.com/{}.mp3", id),
            })
        })
        .collect();

    json!({
        "tracks": tracks,
        "reciters": [],
        "surahs": [],
    })
}
