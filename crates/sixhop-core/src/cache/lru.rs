//! Thread-safe LRU cache with per-entry TTL.
//!
//! Recency order lives in an `IndexMap` (front = LRU, back = MRU);
//! a single cache-wide mutex guards the map, and counters are atomics
//! so statistics reads never contend with the map.
//!
//! Expiry is lazy: `get` drops an expired entry on contact, and at
//! most once per cleanup interval a `get` also sweeps the whole map so
//! dead entries that are never re-queried still get reclaimed.

#![allow(clippy::cast_precision_loss)] // Precision loss acceptable for hit rate calculation

use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::Serialize;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Default spacing of TTL sweeps.
pub(crate) const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Cache statistics for monitoring.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Number of capacity evictions.
    pub evictions: u64,
    /// Number of entries dropped by expiry sweeps.
    pub cleanups: u64,
}

impl CacheStats {
    /// Calculate hit rate (0.0 to 1.0).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
    ttl: Duration,
    access_count: u64,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() > self.ttl
    }
}

#[derive(Debug)]
struct CacheInner<K, V> {
    entries: IndexMap<K, CacheEntry<V>>,
    last_cleanup: Instant,
}

/// Bounded LRU cache with per-entry TTL.
///
/// All operations take the cache-wide lock and are O(1), except the
/// amortised expiry sweep which is O(len). The cache is not
/// async-aware; callers needing cancellation must wrap it externally.
pub struct LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    max_size: usize,
    default_ttl: Duration,
    cleanup_interval: Duration,
    inner: Mutex<CacheInner<K, V>>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    cleanups: AtomicU64,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Creates a cache bounded at `max_size` entries with the given
    /// default TTL.
    #[must_use]
    pub fn new(max_size: usize, default_ttl: Duration) -> Self {
        Self {
            max_size,
            default_ttl,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
            inner: Mutex::new(CacheInner {
                entries: IndexMap::new(),
                last_cleanup: Instant::now(),
            }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
            cleanups: AtomicU64::new(0),
        }
    }

    /// Sets the minimum spacing of expiry sweeps (builder pattern).
    #[must_use]
    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    /// Maximum number of entries.
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Current number of entries (expired-but-unswept included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Returns whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Retrieves a value, promoting the entry to most recently used.
    ///
    /// An expired entry is dropped on contact and reported as a miss.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.lock();
        self.maybe_sweep(&mut inner);

        let expired = match inner.entries.get(key) {
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                return None;
            }
            Some(entry) => entry.is_expired(),
        };
        if expired {
            inner.entries.shift_remove(key);
            self.misses.fetch_add(1, Ordering::Relaxed);
            return None;
        }

        // Promote to MRU: shift_remove keeps the order of everything
        // else intact, re-insert lands at the back.
        let mut entry = inner.entries.shift_remove(key).expect("entry just seen");
        entry.access_count += 1;
        let value = entry.value.clone();
        inner.entries.insert(key.clone(), entry);
        self.hits.fetch_add(1, Ordering::Relaxed);
        Some(value)
    }

    /// Stores a value with the default TTL.
    pub fn put(&self, key: K, value: V) {
        self.put_with_ttl(key, value, None);
    }

    /// Stores a value, overriding the TTL when `ttl` is `Some`.
    ///
    /// Re-inserting an existing key resets both its recency and TTL.
    /// Evicts from the LRU end while over capacity.
    pub fn put_with_ttl(&self, key: K, value: V, ttl: Option<Duration>) {
        let mut inner = self.inner.lock();
        inner.entries.shift_remove(&key);
        inner.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
                ttl: ttl.unwrap_or(self.default_ttl),
                access_count: 1,
            },
        );
        while inner.entries.len() > self.max_size {
            inner.entries.shift_remove_index(0);
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Removes an entry. Returns whether it was present.
    ///
    /// Order-preserving removal: eviction order of the remaining
    /// entries is contractual, so this never uses `swap_remove`.
    pub fn delete(&self, key: &K) -> bool {
        self.inner.lock().entries.shift_remove(key).is_some()
    }

    /// Drops all entries and resets the statistics counters.
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
        self.cleanups.store(0, Ordering::Relaxed);
    }

    /// Snapshot of the keys, LRU end first.
    #[must_use]
    pub fn keys(&self) -> Vec<K> {
        self.inner.lock().entries.keys().cloned().collect()
    }

    /// Returns cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            cleanups: self.cleanups.load(Ordering::Relaxed),
        }
    }

    /// Hit rate over the cache's lifetime (0.0 when idle).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        self.stats().hit_rate()
    }

    /// Drops expired entries if the cleanup interval has elapsed.
    fn maybe_sweep(&self, inner: &mut CacheInner<K, V>) {
        if inner.last_cleanup.elapsed() < self.cleanup_interval {
            return;
        }
        let expired: Vec<K> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            inner.entries.shift_remove(key);
        }
        self.cleanups.fetch_add(expired.len() as u64, Ordering::Relaxed);
        inner.last_cleanup = Instant::now();
    }
}
