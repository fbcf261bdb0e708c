//! Logging middleware
//!
//! This module provides request logging for the HTTP server: every request
//! gets a request id, and its method, path, status and latency are logged.

use std::time::{Duration, Instant};
use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{debug, info, warn, Span};
use uuid::Uuid;

/// Response header carrying the request id
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Requests slower than this are logged as warnings
const SLOW_REQUEST: Duration = Duration::from_secs(1);

/// Log each request and tag its response with an `x-request-id` header
pub async fn log_requests(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let tracker = PerformanceTracker::new(
        request_id,
        request.method().to_string(),
        request.uri().path().to_string(),
    );

    let mut response = next.run(request).await;
    tracker.complete(response.status());

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER.clone(), value);
    }

    response
}

/// Performance tracker for measuring request duration
pub struct PerformanceTracker {
    request_id: Uuid,
    method: String,
    path: String,
    start_time: Instant,
    _span: Span,
}

impl PerformanceTracker {
    fn new(request_id: Uuid, method: String, path: String) -> Self {
        let span = tracing::info_span!("request", request_id = %request_id, method = %method, path = %path);

        Self {
            request_id,
            method,
            path,
            start_time: Instant::now(),
            _span: span,
        }
    }

    /// Complete the performance tracking and log the result
    pub fn complete(self, status: StatusCode) {
        let duration = self.start_time.elapsed();
        let duration_ms = duration.as_millis();

        if status.is_server_error() {
            warn!(
                request_id = %self.request_id,
                method = %self.method,
                path = %self.path,
                status = status.as_u16(),
                duration_ms = duration_ms,
                "Request failed"
            );
        } else {
            info!(
                request_id = %self.request_id,
                method = %self.method,
                path = %self.path,
                status = status.as_u16(),
                duration_ms = duration_ms,
                "Request completed"
            );
        }

        if duration > SLOW_REQUEST {
            warn!(
                request_id = %self.request_id,
                path = %self.path,
                duration_ms = duration_ms,
                "Slow request detected"
            );
        }
    }
}

impl Drop for PerformanceTracker {
    fn drop(&mut self) {
        debug!(
            request_id = %self.request_id,
            duration_ms = self.start_time.elapsed().as_millis(),
            "Performance tracker dropped"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_tracker() {
        let tracker = PerformanceTracker::new(Uuid::new_v4(), "GET".to_string(), "/ar".to_string());
        std::thread::sleep(std::time::Duration::from_millis(10));
        tracker.complete(StatusCode::OK);
    }

    #[test]
    fn test_request_id_header_name() {
        assert_eq!(REQUEST_ID_HEADER.as_str(), "x-request-id");
    }
}
