//! Shared fetch cache
//!
//! An explicit, injectable cache that several fetchers can share. Entries are
//! keyed by endpoint and filter key and expire after a TTL. Concurrent misses
//! for the same key are single-flighted: one upstream request runs and every
//! waiter receives its result. Failures are handed to the waiters but never
//! stored.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::debug;
use crate::config::CacheConfig;

/// Entry count above which inserts first sweep out expired entries
const PURGE_THRESHOLD: usize = 128;

type SharedFetch<T> = Shared<BoxFuture<'static, Result<Arc<T>, String>>>;

enum Slot<T> {
    Ready { value: Arc<T>, stored_at: Instant },
    InFlight { generation: u64, fetch: SharedFetch<T> },
}

/// Cross-fetcher cache with single-flight deduplication
pub struct SharedCache<T> {
    slots: Arc<Mutex<HashMap<String, Slot<T>>>>,
    generation: Arc<AtomicU64>,
    ttl: Duration,
}

impl<T> Clone for SharedCache<T> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
            generation: Arc::clone(&self.generation),
            ttl: self.ttl,
        }
    }
}

impl<T> std::fmt::Debug for SharedCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.len())
            .finish()
    }
}

impl<T> SharedCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
            generation: Arc::new(AtomicU64::new(0)),
            ttl,
        }
    }

    /// `None` when the cache is disabled in configuration
    pub fn from_config(config: &CacheConfig) -> Option<Self> {
        config
            .enabled
            .then(|| Self::new(Duration::from_secs(config.ttl_seconds)))
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Slot<T>>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of stored or in-flight entries
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop one entry
    pub fn invalidate(&self, key: &str) -> bool {
        self.lock().remove(key).is_some()
    }

    /// Drop expired entries; in-flight requests are kept
    pub fn purge_expired(&self) -> usize {
        purge_expired(&mut self.lock(), self.ttl)
    }

    /// Drop every entry
    pub fn clear(&self) -> usize {
        let mut slots = self.lock();
        let count = slots.len();
        slots.clear();
        count
    }
}

impl<T: Send + Sync + 'static> SharedCache<T> {
    /// Fresh cached value for `key`, if any
    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        match self.lock().get(key) {
            Some(Slot::Ready { value, stored_at }) if stored_at.elapsed() < self.ttl => {
                Some(Arc::clone(value))
            }
            _ => None,
        }
    }

    /// Store a value fetched outside the cache (e.g. a forced refetch)
    pub fn store(&self, key: &str, value: Arc<T>) {
        let mut slots = self.lock();
        if slots.len() >= PURGE_THRESHOLD {
            purge_expired(&mut slots, self.ttl);
        }
        slots.insert(
            key.to_string(),
            Slot::Ready {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Return the cached value for `key` or run `fetch`, joining an in-flight
    /// request for the same key when one exists.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> Result<Arc<T>, String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, String>> + Send + 'static,
    {
        let (generation, shared) = {
            let mut slots = self.lock();
            match slots.get(key) {
                Some(Slot::Ready { value, stored_at }) if stored_at.elapsed() < self.ttl => {
                    debug!(key = key, "Cache hit");
                    return Ok(Arc::clone(value));
                }
                Some(Slot::InFlight { generation, fetch }) => {
                    debug!(key = key, "Joining in-flight request");
                    (*generation, fetch.clone())
                }
                _ => {
                    if slots.len() >= PURGE_THRESHOLD {
                        purge_expired(&mut slots, self.ttl);
                    }
                    let generation = self.generation.fetch_add(1, Ordering::Relaxed);
                    let shared = fetch().map(|result| result.map(Arc::new)).boxed().shared();
                    slots.insert(
                        key.to_string(),
                        Slot::InFlight {
                            generation,
                            fetch: shared.clone(),
                        },
                    );
                    (generation, shared)
                }
            }
        };

        let result = shared.await;
        self.settle(key, generation, &result);
        result
    }

    /// Replace the in-flight slot of `generation` with its outcome
    fn settle(&self, key: &str, generation: u64, result: &Result<Arc<T>, String>) {
        let mut slots = self.lock();
        let owns_slot = matches!(
            slots.get(key),
            Some(Slot::InFlight { generation: current, .. }) if *current == generation
        );
        if !owns_slot {
            return;
        }

        match result {
            Ok(value) => {
                slots.insert(
                    key.to_string(),
                    Slot::Ready {
                        value: Arc::clone(value),
                        stored_at: Instant::now(),
                    },
                );
            }
            Err(_) => {
                slots.remove(key);
            }
        }
    }
}

fn purge_expired<T>(slots: &mut HashMap<String, Slot<T>>, ttl: Duration) -> usize {
    let before = slots.len();
    slots.retain(|_, slot| match slot {
        Slot::Ready { stored_at, .. } => stored_at.elapsed() < ttl,
        Slot::InFlight { .. } => true,
    });
    let purged = before - slots.len();
    if purged > 0 {
        debug!(purged = purged, "Purged expired cache entries");
    }
    purged
}
