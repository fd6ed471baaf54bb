//! Endpoint-symmetric cache for path query results.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::lru::{CacheStats, LruCache};
use crate::config::CacheConfig;
use crate::util::epoch_seconds;

/// A cached path record.
///
/// Stored oriented as it was computed; [`PathCache::get`] re-orients a
/// copy when the caller queried the opposite direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedPath {
    /// Whether a path was found.
    pub found: bool,
    /// The path, start to target inclusive.
    pub path: Option<Vec<String>>,
    /// Number of edges on the path (−1 when not found).
    pub degrees_of_separation: i32,
    /// Vertices dequeued by the search that produced this record.
    pub nodes_explored: usize,
    /// Wall-clock time of the producing search, in milliseconds.
    pub algorithm_execution_time_ms: f64,
    /// Endpoint the stored orientation starts from.
    pub start_user_id: String,
    /// Endpoint the stored orientation ends at.
    pub target_user_id: String,
    /// Seconds since epoch at insertion time.
    pub cached_at: f64,
}

/// Statistics for the path cache.
#[derive(Debug, Clone, Serialize)]
pub struct PathCacheStats {
    /// Current number of cached paths.
    pub size: usize,
    /// Capacity.
    pub max_size: usize,
    /// Default TTL of path entries, in seconds.
    pub path_ttl_secs: u64,
    /// Hit rate over the cache lifetime.
    pub hit_rate: f64,
    /// Underlying counter set.
    #[serde(flatten)]
    pub counters: CacheStats,
}

/// Cache of path results keyed order-independently over the endpoints.
///
/// Key grammar: `"path:" + min(a,b) + ":" + max(a,b)` (lexicographic),
/// so `(a, b)` and `(b, a)` share one entry.
pub struct PathCache {
    cache: LruCache<String, CachedPath>,
    path_ttl: Duration,
}

/// Builds the shared key for an endpoint pair.
fn path_key(a: &str, b: &str) -> String {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    format!("path:{lo}:{hi}")
}

impl PathCache {
    /// Creates a path cache bounded at `max_size` with the given TTL.
    #[must_use]
    pub fn new(max_size: usize, path_ttl: Duration) -> Self {
        Self {
            cache: LruCache::new(max_size, path_ttl),
            path_ttl,
        }
    }

    /// Creates a path cache from a configuration section.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        Self {
            cache: LruCache::new(config.max_size, config.path_ttl())
                .with_cleanup_interval(config.cleanup_interval()),
            path_ttl: config.path_ttl(),
        }
    }

    /// Sets the expiry-sweep spacing (builder pattern).
    #[must_use]
    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.cache = self.cache.with_cleanup_interval(interval);
        self
    }

    /// Fetches the cached record for `(start, target)`, if any.
    ///
    /// When the stored orientation differs from the query, the
    /// returned copy has its path reversed and endpoints swapped; the
    /// stored record is never mutated.
    #[must_use]
    pub fn get(&self, start: &str, target: &str) -> Option<CachedPath> {
        let record = self.cache.get(&path_key(start, target))?;
        if record.start_user_id == start {
            return Some(record);
        }
        let mut flipped = record;
        if let Some(path) = flipped.path.as_mut() {
            path.reverse();
        }
        std::mem::swap(&mut flipped.start_user_id, &mut flipped.target_user_id);
        Some(flipped)
    }

    /// Stores a record for `(start, target)`.
    ///
    /// The record is stamped with the queried orientation and the
    /// insertion time before it goes in.
    pub fn put(&self, start: &str, target: &str, mut record: CachedPath) {
        record.start_user_id = start.to_string();
        record.target_user_id = target.to_string();
        record.cached_at = epoch_seconds();
        self.cache.put(path_key(start, target), record);
    }

    /// Drops every entry whose key involves `user_id`.
    ///
    /// Matching anchors on the `:`-separated key segments, never on
    /// substrings, so an id that prefixes another cannot
    /// over-invalidate. Returns the number of entries dropped.
    pub fn invalidate_user(&self, user_id: &str) -> usize {
        let mut removed = 0;
        for key in self.cache.keys() {
            let Some(endpoints) = key.strip_prefix("path:") else {
                continue;
            };
            let Some((lo, hi)) = endpoints.split_once(':') else {
                continue;
            };
            if (lo == user_id || hi == user_id) && self.cache.delete(&key) {
                removed += 1;
            }
        }
        if removed > 0 {
            tracing::debug!(%user_id, removed, "invalidated cached paths");
        }
        removed
    }

    /// Current number of cached paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drops all entries.
    pub fn clear(&self) {
        self.cache.clear();
    }

    /// Returns statistics for this cache.
    #[must_use]
    pub fn stats(&self) -> PathCacheStats {
        let counters = self.cache.stats();
        PathCacheStats {
            size: self.cache.len(),
            max_size: self.cache.max_size(),
            path_ttl_secs: self.path_ttl.as_secs(),
            hit_rate: counters.hit_rate(),
            counters,
        }
    }
}
