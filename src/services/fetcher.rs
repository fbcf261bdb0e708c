//! Data-fetch client
//!
//! A [`DataFetcher`] tracks the lifecycle of reading one JSON endpoint:
//! it holds the current filters, fetches when their canonical key changes,
//! supports manual refetch, and publishes every state transition on a
//! `watch` channel.
//!
//! Requests are never cancelled. Each request takes a sequence number when
//! it is issued and a response is applied only if no newer request has been
//! issued since, so the published state always belongs to the last-issued
//! request even when responses complete out of order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::debug;
use url::Url;
use crate::utils::errors::{MinbarError, Result};
use crate::utils::logging::log_fetch_result;
use super::cache::SharedCache;
use super::filters::Filters;

/// Longest upstream error body quoted in an error message
const MAX_ERROR_BODY: usize = 200;

/// Observable state of one fetcher
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> FetchState<T> {
    /// Loading, with no data and no error
    pub fn initial() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    pub fn is_settled(&self) -> bool {
        !self.loading
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::initial()
    }
}

/// Filters plus the key of the last filters a fetch was issued for
#[derive(Debug, Default)]
struct Tracking {
    filters: Filters,
    applied_key: Option<String>,
}

struct Inner<T> {
    client: Client,
    endpoint: Url,
    tracking: Mutex<Tracking>,
    issued: AtomicU64,
    state: watch::Sender<FetchState<T>>,
    cache: Option<SharedCache<T>>,
}

/// Lifecycle-tracking reader of one JSON endpoint
pub struct DataFetcher<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for DataFetcher<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> DataFetcher<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Create a fetcher in the initial loading state. Nothing is requested
    /// until [`mount`](Self::mount), [`set_filters`](Self::set_filters) or
    /// [`refetch`](Self::refetch) is called.
    pub fn new(client: Client, endpoint: Url, filters: Filters) -> Self {
        Self::with_cache(client, endpoint, filters, None)
    }

    /// Like [`new`](Self::new), reading through `cache` when one is given
    pub fn with_cache(
        client: Client,
        endpoint: Url,
        filters: Filters,
        cache: Option<SharedCache<T>>,
    ) -> Self {
        let (state, _) = watch::channel(FetchState::initial());

        Self {
            inner: Arc::new(Inner {
                client,
                endpoint,
                tracking: Mutex::new(Tracking {
                    filters,
                    applied_key: None,
                }),
                issued: AtomicU64::new(0),
                state,
                cache,
            }),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Snapshot of the current state
    pub fn state(&self) -> FetchState<T> {
        self.inner.state.borrow().clone()
    }

    /// Receiver that observes every state transition
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.inner.state.subscribe()
    }

    /// Currently stored filters
    pub fn filters(&self) -> Filters {
        self.tracking().filters.clone()
    }

    /// Canonical key of the currently stored filters
    pub fn filter_key(&self) -> String {
        self.tracking().filters.filter_key()
    }

    /// First fetch with the stored filters
    pub async fn mount(&self) -> bool {
        let filters = {
            let mut tracking = self.tracking();
            tracking.applied_key = Some(tracking.filters.filter_key());
            tracking.filters.clone()
        };

        self.fetch(filters, true).await
    }

    /// Store `filters` and fetch if their key differs from the last fetched key.
    ///
    /// Returns whether a request was issued.
    pub async fn set_filters(&self, filters: Filters) -> bool {
        let key = filters.filter_key();
        {
            let mut tracking = self.tracking();
            let unchanged = tracking.applied_key.as_deref() == Some(key.as_str());
            tracking.filters = filters.clone();
            if unchanged {
                debug!(endpoint = %self.inner.endpoint, filter_key = %key, "Filter key unchanged, skipping fetch");
                return false;
            }
            tracking.applied_key = Some(key);
        }

        self.fetch(filters, true).await;
        true
    }

    /// Fetch again with `filters` (stored first) or the stored filters,
    /// whether or not the key changed. Bypasses the shared cache and
    /// refreshes it on success.
    ///
    /// Returns whether this request's result was applied.
    pub async fn refetch(&self, filters: Option<Filters>) -> bool {
        let filters = {
            let mut tracking = self.tracking();
            if let Some(filters) = filters {
                tracking.filters = filters;
            }
            tracking.applied_key = Some(tracking.filters.filter_key());
            tracking.filters.clone()
        };

        self.fetch(filters, false).await
    }

    fn tracking(&self) -> MutexGuard<'_, Tracking> {
        self.inner
            .tracking
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Issue one request and apply its outcome unless a newer one was issued
    async fn fetch(&self, filters: Filters, use_cache: bool) -> bool {
        let mut sequence = 0;
        self.inner.state.send_modify(|state| {
            sequence = self.inner.issued.fetch_add(1, Ordering::SeqCst) + 1;
            state.loading = true;
            state.error = None;
        });

        let filter_key = filters.filter_key();
        let url = filters.apply_to(&self.inner.endpoint);
        debug!(url = %url, sequence = sequence, "Issuing fetch");

        let client = self.inner.client.clone();
        let outcome: std::result::Result<T, String> = match (&self.inner.cache, use_cache) {
            (Some(cache), true) => {
                let cache_key = format!("{}?{}", self.inner.endpoint, filter_key);
                cache
                    .get_or_fetch(&cache_key, move || async move {
                        request_json::<T>(&client, url).await.map_err(|e| e.to_string())
                    })
                    .await
                    .map(|data| T::clone(&data))
            }
            (Some(cache), false) => {
                let cache_key = format!("{}?{}", self.inner.endpoint, filter_key);
                let result = request_json::<T>(&client, url).await.map_err(|e| e.to_string());
                if let Ok(data) = &result {
                    cache.store(&cache_key, Arc::new(data.clone()));
                }
                result
            }
            (None, _) => request_json::<T>(&client, url).await.map_err(|e| e.to_string()),
        };

        log_fetch_result(
            self.inner.endpoint.as_str(),
            &filter_key,
            sequence,
            outcome.as_ref().err().map(String::as_str),
        );

        let issued = &self.inner.issued;
        let applied = self.inner.state.send_if_modified(|state| {
            if issued.load(Ordering::SeqCst) != sequence {
                return false;
            }
            match outcome {
                Ok(data) => {
                    state.data = Some(data);
                    state.error = None;
                }
                Err(message) => {
                    state.error = Some(message);
                }
            }
            state.loading = false;
            true
        });

        if !applied {
            debug!(
                endpoint = %self.inner.endpoint,
                sequence = sequence,
                "Discarding response superseded by a newer request"
            );
        }

        applied
    }
}

/// GET `url` and decode its JSON body, treating any non-2xx status as an error
pub async fn request_json<T: DeserializeOwned>(client: &Client, url: Url) -> Result<T> {
    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            MinbarError::ServiceUnavailable("request timed out".to_string())
        } else if e.is_connect() {
            MinbarError::ServiceUnavailable(format!("connection failed: {}", e))
        } else {
            MinbarError::Http(e)
        }
    })?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(MinbarError::Upstream {
            status: status.as_u16(),
            message: truncate(&body, MAX_ERROR_BODY),
        });
    }

    Ok(serde_json::from_str(&body)?)
}

fn truncate(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = FetchState::<Vec<u32>>::initial();
        assert!(state.loading);
        assert!(state.data.is_none());
        assert!(state.error.is_none());
        assert!(!state.is_settled());
    }

    #[test]
    fn test_new_fetcher_is_loading() {
        let endpoint = Url::parse("http://localhost:1/api/audio").unwrap();
        let fetcher: DataFetcher<Vec<u32>> = DataFetcher::new(Client::new(), endpoint, Filters::new());
        assert_eq!(fetcher.state(), FetchState::initial());
        assert_eq!(fetcher.filter_key(), "");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("سورة الفاتحة", 4), "سورة...");
    }
}
