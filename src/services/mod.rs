//! Services module
//!
//! This module contains the content catalogue, the audio proxy, and the
//! data-fetch client used to consume the read endpoints.

pub mod api_client;
pub mod audio_proxy;
pub mod cache;
pub mod catalog;
pub mod fetcher;
pub mod filters;

// Re-export commonly used services
pub use api_client::{ApiClient, AUDIO_ENDPOINT, VIDEO_ENDPOINT};
pub use audio_proxy::{AudioProxy, ProxiedAudio};
pub use cache::SharedCache;
pub use catalog::{AudioQuery, Catalog, VideoQuery};
pub use fetcher::{request_json, DataFetcher, FetchState};
pub use filters::{Filters, NO_FILTER};
