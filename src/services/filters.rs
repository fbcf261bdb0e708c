//! Request filters
//!
//! Filters are sent as query parameters. The value `all` (and the empty
//! string) means "no filter" and is never encoded.

use std::collections::BTreeMap;
use url::Url;

/// Value meaning "do not filter on this key"
pub const NO_FILTER: &str = "all";

/// Filter/query set for a read endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    values: BTreeMap<String, String>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Whether `value` actually restricts results
    pub fn is_active(value: &str) -> bool {
        let value = value.trim();
        !value.is_empty() && value != NO_FILTER
    }

    /// Parameters to send, sorted by key, sentinel and empty values omitted
    pub fn query_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .filter(|(_, v)| Self::is_active(v))
            .map(|(k, v)| (k.as_str(), v.trim()))
    }

    /// Canonical change-detection key.
    ///
    /// Independent of insertion order; two filter sets that send the same
    /// parameters share a key, so `{reciter: all}` and `{}` are equal here.
    pub fn filter_key(&self) -> String {
        self.query_pairs()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Copy of `endpoint` with the active filters appended as query parameters
    pub fn apply_to(&self, endpoint: &Url) -> Url {
        let mut url = endpoint.clone();
        let mut pairs = self.query_pairs().peekable();
        if pairs.peek().is_some() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }
}

impl<K, V> FromIterator<(K, V)> for Filters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = Filters::new();
        for (k, v) in iter {
            filters.set(k, v);
        }
        filters
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Filters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
