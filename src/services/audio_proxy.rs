//! Audio proxy service
//!
//! Fetches audio files from an allow-list of upstream hosts so the player can
//! load them from the site's own origin. Redirects are followed only while
//! they stay on allowed hosts, and bodies are streamed through rather than
//! buffered.

use std::sync::Arc;
use std::time::Duration;
use axum::body::Body;
use reqwest::{redirect, Client, Response};
use tracing::{debug, warn};
use url::Url;
use crate::config::ProxyConfig;
use crate::utils::errors::{MinbarError, Result};

const DEFAULT_CONTENT_TYPE: &str = "audio/mpeg";

/// Longest redirect chain followed for one request
const MAX_REDIRECTS: usize = 5;

/// Upstream audio response, headers read and body not yet consumed
#[derive(Debug)]
pub struct ProxiedAudio {
    pub content_type: String,
    pub content_length: Option<u64>,
    response: Response,
}

impl ProxiedAudio {
    /// Stream the upstream body chunk by chunk
    pub fn into_body(self) -> Body {
        Body::from_stream(self.response.bytes_stream())
    }
}

/// Allow-listed pass-through fetcher for audio files
#[derive(Debug, Clone)]
pub struct AudioProxy {
    client: Client,
    allowed_hosts: Arc<[String]>,
}

impl AudioProxy {
    /// Create a new AudioProxy instance
    pub fn new(config: &ProxyConfig) -> Result<Self> {
        let allowed_hosts: Arc<[String]> = config
            .allowed_hosts
            .iter()
            .map(|h| h.to_ascii_lowercase())
            .collect();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("Minbar/", env!("CARGO_PKG_VERSION")))
            .redirect(redirect_policy(Arc::clone(&allowed_hosts)))
            .build()
            .map_err(MinbarError::Http)?;

        Ok(Self {
            client,
            allowed_hosts,
        })
    }

    /// Parse `raw` and check it targets an allowed host over http(s)
    pub fn validate_url(&self, raw: &str) -> Result<Url> {
        let url = Url::parse(raw)
            .map_err(|e| MinbarError::InvalidInput(format!("Invalid audio URL: {}", e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(MinbarError::InvalidInput(format!(
                "Unsupported URL scheme: {}",
                url.scheme()
            )));
        }

        let host = url
            .host_str()
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| MinbarError::InvalidInput("Audio URL has no host".to_string()))?;

        if !is_allowed(&self.allowed_hosts, &url) {
            warn!(host = %host, "Rejected audio proxy request for host outside allow-list");
            return Err(MinbarError::InvalidInput(format!("Host not allowed: {}", host)));
        }

        Ok(url)
    }

    /// Fetch an allowed audio URL; the body is left on the wire for [`ProxiedAudio::into_body`]
    pub async fn fetch(&self, raw: &str) -> Result<ProxiedAudio> {
        let url = self.validate_url(raw)?;
        debug!(url = %url, "Proxying audio request");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                MinbarError::ServiceUnavailable("audio upstream timed out".to_string())
            } else {
                MinbarError::Http(e)
            }
        })?;

        let status = response.status();
        if status.is_redirection() {
            return Err(MinbarError::Upstream {
                status: status.as_u16(),
                message: "redirect outside the allowed hosts".to_string(),
            });
        }
        if !status.is_success() {
            return Err(MinbarError::Upstream {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("upstream error").to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let content_length = response.content_length();

        Ok(ProxiedAudio {
            content_type,
            content_length,
            response,
        })
    }
}

fn is_allowed(allowed_hosts: &[String], url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
        && url
            .host_str()
            .is_some_and(|host| allowed_hosts.iter().any(|allowed| allowed.eq_ignore_ascii_case(host)))
}

/// Follow a redirect only to an allowed host; otherwise hand the 3xx back
fn redirect_policy(allowed_hosts: Arc<[String]>) -> redirect::Policy {
    redirect::Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else if is_allowed(&allowed_hosts, attempt.url()) {
            attempt.follow()
        } else {
            warn!(target_url = %attempt.url(), "Refusing audio redirect to host outside allow-list");
            attempt.stop()
        }
    })
}
