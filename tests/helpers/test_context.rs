//! Test context for unified test setup
//!
//! Builds the full application router over the built-in seed catalogue and
//! exposes small helpers for issuing requests through `tower::ServiceExt`.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use minbar::config::Settings;
use minbar::server::{build_app, AppState};
use minbar::services::Catalog;

/// Response pieces a test usually wants to look at
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }
}

/// Unified test context holding the application under test
pub struct TestContext {
    pub settings: Settings,
    pub app: Router,
}

/// Configuration for test context
#[derive(Debug, Clone, Default)]
pub struct TestConfig {
    pub negotiate_from_header: bool,
    pub proxy_allowed_hosts: Option<Vec<String>>,
}

impl TestContext {
    /// Create a new test context with default settings
    pub fn new() -> Self {
        Self::new_with_config(TestConfig::default())
    }

    /// Create a new test context with custom configuration
    pub fn new_with_config(config: TestConfig) -> Self {
        let _ = tracing_subscriber::fmt::try_init();

        let mut settings = Settings::default();
        settings.routing.negotiate_from_header = config.negotiate_from_header;
        if let Some(hosts) = config.proxy_allowed_hosts {
            settings.proxy.allowed_hosts = hosts;
        }

        let state = AppState::new(&settings, Catalog::seed()).expect("default settings build state");
        let app = build_app(state, &settings.server);

        Self { settings, app }
    }

    /// Issue a GET request against the router
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.get_with_headers(uri, &[]).await
    }

    pub async fn get_with_headers(&self, uri: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(Body::empty()).expect("valid request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let location = header_string(response.headers(), header::LOCATION);
        let content_type = header_string(response.headers(), header::CONTENT_TYPE);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body can be read")
            .to_vec();

        TestResponse {
            status,
            location,
            content_type,
            body,
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn header_string(headers: &axum::http::HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
