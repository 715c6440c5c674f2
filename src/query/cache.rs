//! Query result cache.
//!
//! Results are keyed by a caller-supplied scope (typically the actor and a
//! snapshot version) plus the serialized filter. Entries expire after a
//! fixed time-to-live, checked when they are read; there are no per-entry
//! timers.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::sync::Cache;

use crate::config::BusinessRules;
use crate::error::{EngineError, EngineResult};

use super::filter::{RequestFilter, RequestQueryResult};

/// Bounded, time-limited cache of request query results.
///
/// Cloning is cheap and clones share entries.
///
/// # Example
///
/// ```
/// use schedule_engine::query::{QueryCache, RequestFilter, RequestQueryResult};
/// use std::time::Duration;
///
/// let cache = QueryCache::new(Duration::from_secs(60), 100);
/// let key = QueryCache::key("sup_1:v42", &RequestFilter::default(), None).unwrap();
/// let first = cache.get_or_compute(key.clone(), RequestQueryResult::default);
/// let second = cache.get_or_compute(key, || unreachable!());
/// assert_eq!(first, second);
/// ```
#[derive(Clone)]
pub struct QueryCache {
    cache: Cache<String, Arc<RequestQueryResult>>,
}

impl QueryCache {
    /// Creates a cache with the given time-to-live and entry capacity.
    pub fn new(ttl: Duration, capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    /// Creates a cache sized by the business configuration.
    pub fn from_rules(rules: &BusinessRules) -> Self {
        Self::new(
            Duration::from_secs(rules.query_cache_ttl_seconds),
            rules.query_cache_capacity,
        )
    }

    /// Builds the cache key for a scope, filter, and reference date.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Serialization`] if the filter cannot be
    /// encoded.
    pub fn key(scope: &str, filter: &RequestFilter, today: Option<NaiveDate>) -> EngineResult<String> {
        let encoded = serde_json::to_string(filter).map_err(|e| EngineError::Serialization {
            message: e.to_string(),
        })?;
        Ok(match today {
            Some(today) => format!("{}|{}|{}", scope, today, encoded),
            None => format!("{}|{}", scope, encoded),
        })
    }

    /// Returns the cached result for `key`, computing and storing it when
    /// absent or expired.
    pub fn get_or_compute<F>(&self, key: String, compute: F) -> Arc<RequestQueryResult>
    where
        F: FnOnce() -> RequestQueryResult,
    {
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(key = %key, "Query cache hit");
            return hit;
        }
        tracing::debug!(key = %key, "Query cache miss");
        self.cache.get_with(key, || Arc::new(compute()))
    }

    /// Returns the cached result for `key`, if present and fresh.
    pub fn get(&self, key: &str) -> Option<Arc<RequestQueryResult>> {
        self.cache.get(key)
    }

    /// Drops one entry.
    pub fn invalidate(&self, key: &str) {
        self.cache.invalidate(key);
    }

    /// Drops every entry, e.g. after the caller writes new requests.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}
