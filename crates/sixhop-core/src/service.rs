//! Pathfinding service: graph + search + cache orchestration.
//!
//! [`PathService`] is the engine's front door. Queries consult the
//! path cache before running the search; mutations write through to
//! the graph and invalidate every cached path touching either
//! endpoint, so no stale entry survives an adjacency change.
//!
//! Lock hierarchy: shard locks → cache lock → metrics lock, and no
//! lock is ever held across a call into another component.

#![allow(clippy::cast_precision_loss)] // Precision loss acceptable for rate calculations

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use crate::cache::{CachedPath, PathCache, PathCacheStats};
use crate::config::EngineConfig;
use crate::graph::{GraphStats, SocialGraph};
use crate::model::User;
use crate::search::BidirectionalBfs;
use crate::util::epoch_seconds;

/// Wire-format result of a path query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathResponse {
    /// Whether a path was found.
    pub found: bool,
    /// The path, start to target inclusive; `None` when not found.
    pub path: Option<Vec<String>>,
    /// Number of edges on the path; −1 when not found.
    pub degrees_of_separation: i32,
    /// Vertices dequeued by the search.
    pub nodes_explored: usize,
    /// Wall-clock time of the search itself, in milliseconds.
    pub algorithm_execution_time_ms: f64,
    /// Wall-clock time of the whole service call, in milliseconds.
    pub service_response_time_ms: f64,
    /// Whether the result came from the path cache.
    pub from_cache: bool,
    /// Queried start endpoint.
    pub start_user_id: String,
    /// Queried target endpoint.
    pub target_user_id: String,
    /// Seconds since epoch at response time.
    pub timestamp: f64,
}

/// Service-level query counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryMetrics {
    /// Queries received.
    pub total_queries: u64,
    /// Queries served from the path cache.
    pub cache_hits: u64,
    /// Queries that consulted the cache and missed.
    pub cache_misses: u64,
    /// Queries that returned a path.
    pub successful_queries: u64,
    /// Queries that returned `found = false`.
    pub failed_queries: u64,
}

/// Merged service / graph / cache statistics.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStats {
    /// Query counters.
    pub service: QueryMetrics,
    /// `cache_hits / total_queries`, 0 when idle.
    pub cache_hit_rate: f64,
    /// `successful_queries / total_queries`, 0 when idle.
    pub success_rate: f64,
    /// Graph statistics.
    pub graph: GraphStats,
    /// Path-cache statistics.
    pub cache: PathCacheStats,
    /// Seconds since epoch at collection time.
    pub timestamp: f64,
}

/// Result of a health probe. Never produced by unwinding.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Overall verdict.
    pub healthy: bool,
    /// Whether graph statistics were obtainable.
    pub graph: bool,
    /// Whether the cache responded.
    pub cache: bool,
    /// Failure detail, when unhealthy.
    pub error: Option<String>,
    /// Seconds since epoch at probe time.
    pub timestamp: f64,
}

/// Orchestrates the sharded graph, the bidirectional search, and the
/// path cache, and keeps service-level metrics.
pub struct PathService {
    graph: Arc<SocialGraph>,
    cache: PathCache,
    finder: BidirectionalBfs,
    metrics: Mutex<QueryMetrics>,
    caching_enabled: bool,
}

impl Default for PathService {
    fn default() -> Self {
        Self::new()
    }
}

impl PathService {
    /// Creates a service with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    /// Creates a service from a configuration.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_graph(
            Arc::new(SocialGraph::with_shards(config.graph.num_shards)),
            config,
        )
    }

    /// Creates a service over an existing graph.
    #[must_use]
    pub fn with_graph(graph: Arc<SocialGraph>, config: &EngineConfig) -> Self {
        Self {
            graph,
            cache: PathCache::from_config(&config.cache),
            finder: BidirectionalBfs::new(config.search.max_depth),
            metrics: Mutex::new(QueryMetrics::default()),
            caching_enabled: true,
        }
    }

    /// Toggles result caching (builder pattern).
    #[must_use]
    pub fn with_caching(mut self, enabled: bool) -> Self {
        self.caching_enabled = enabled;
        self
    }

    /// The underlying graph.
    #[must_use]
    pub fn graph(&self) -> &SocialGraph {
        &self.graph
    }

    /// Finds a shortest path between two users.
    ///
    /// Consults the path cache first unless `use_cache` is false; on a
    /// miss the search runs and a found result is written back. All
    /// outcomes, including unknown users and unreachable targets,
    /// come back as a [`PathResponse`], never as an error.
    pub fn find_path(&self, start: &str, target: &str, use_cache: bool) -> PathResponse {
        let begun = Instant::now();
        self.metrics.lock().total_queries += 1;

        if use_cache && self.caching_enabled {
            if let Some(cached) = self.cache.get(start, target) {
                {
                    let mut metrics = self.metrics.lock();
                    metrics.cache_hits += 1;
                    metrics.successful_queries += 1;
                }
                tracing::debug!(%start, %target, "path served from cache");
                return PathResponse {
                    found: cached.found,
                    path: cached.path,
                    degrees_of_separation: cached.degrees_of_separation,
                    nodes_explored: cached.nodes_explored,
                    algorithm_execution_time_ms: cached.algorithm_execution_time_ms,
                    service_response_time_ms: elapsed_ms(begun),
                    from_cache: true,
                    start_user_id: cached.start_user_id,
                    target_user_id: cached.target_user_id,
                    timestamp: epoch_seconds(),
                };
            }
            self.metrics.lock().cache_misses += 1;
        }

        let result = self.finder.search(self.graph.as_ref(), start, target);

        let mut response = PathResponse {
            found: result.found,
            path: result.path,
            degrees_of_separation: result.distance,
            nodes_explored: result.nodes_explored,
            algorithm_execution_time_ms: result.execution_time_ms,
            service_response_time_ms: 0.0,
            from_cache: false,
            start_user_id: start.to_string(),
            target_user_id: target.to_string(),
            timestamp: epoch_seconds(),
        };

        if response.found && use_cache && self.caching_enabled {
            self.cache.put(
                start,
                target,
                CachedPath {
                    found: response.found,
                    path: response.path.clone(),
                    degrees_of_separation: response.degrees_of_separation,
                    nodes_explored: response.nodes_explored,
                    algorithm_execution_time_ms: response.algorithm_execution_time_ms,
                    start_user_id: response.start_user_id.clone(),
                    target_user_id: response.target_user_id.clone(),
                    cached_at: 0.0,
                },
            );
        }

        {
            let mut metrics = self.metrics.lock();
            if response.found {
                metrics.successful_queries += 1;
            } else {
                metrics.failed_queries += 1;
            }
        }

        response.service_response_time_ms = elapsed_ms(begun);
        response
    }

    /// Just the degrees of separation between two users (−1 when no
    /// path exists).
    pub fn degrees_of_separation(&self, start: &str, target: &str) -> i32 {
        self.find_path(start, target, true).degrees_of_separation
    }

    /// Runs several path queries sequentially.
    ///
    /// The result map is keyed `"start:target"` in input order
    /// semantics (later duplicates overwrite earlier ones).
    pub fn batch_find_paths(&self, pairs: &[(String, String)]) -> HashMap<String, PathResponse> {
        pairs
            .iter()
            .map(|(start, target)| {
                (
                    format!("{start}:{target}"),
                    self.find_path(start, target, true),
                )
            })
            .collect()
    }

    /// Adds a user. See [`SocialGraph::add_user`].
    pub fn add_user(&self, username: &str, email: &str, user_id: Option<&str>) -> String {
        self.graph.add_user(username, email, user_id)
    }

    /// Returns whether the user exists.
    #[must_use]
    pub fn has_user(&self, user_id: &str) -> bool {
        self.graph.has_user(user_id)
    }

    /// Returns a copy of the user record, if it exists.
    #[must_use]
    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.graph.get_user(user_id)
    }

    /// Snapshot of a user's direct connections.
    #[must_use]
    pub fn connections_of(&self, user_id: &str) -> HashSet<String> {
        self.graph.neighbors(user_id)
    }

    /// Users connected to both endpoints.
    #[must_use]
    pub fn mutual_connections(&self, a: &str, b: &str) -> HashSet<String> {
        self.graph.mutual_connections(a, b)
    }

    /// Adds a connection and drops every cached path touching either
    /// endpoint.
    pub fn add_connection(&self, a: &str, b: &str) -> bool {
        let success = self.graph.add_edge(a, b);
        if success && self.caching_enabled {
            self.cache.invalidate_user(a);
            self.cache.invalidate_user(b);
        }
        success
    }

    /// Removes a connection and drops every cached path touching
    /// either endpoint.
    pub fn remove_connection(&self, a: &str, b: &str) -> bool {
        let success = self.graph.remove_edge(a, b);
        if success && self.caching_enabled {
            self.cache.invalidate_user(a);
            self.cache.invalidate_user(b);
        }
        success
    }

    /// Merged service, graph, and cache statistics.
    #[must_use]
    pub fn stats(&self) -> ServiceStats {
        let service = self.metrics.lock().clone();
        let total = service.total_queries;
        let (cache_hit_rate, success_rate) = if total == 0 {
            (0.0, 0.0)
        } else {
            (
                service.cache_hits as f64 / total as f64,
                service.successful_queries as f64 / total as f64,
            )
        };
        ServiceStats {
            service,
            cache_hit_rate,
            success_rate,
            graph: self.graph.stats(),
            cache: self.cache.stats(),
            timestamp: epoch_seconds(),
        }
    }

    /// Probes the service. Infallible: failures are reported in the
    /// returned status, never by unwinding.
    #[must_use]
    pub fn health(&self) -> HealthStatus {
        let graph_ok = self.graph.stats().num_shards > 0;
        let cache_ok = self.cache.len() <= self.cache.stats().max_size;
        HealthStatus {
            healthy: graph_ok && cache_ok,
            graph: graph_ok,
            cache: cache_ok,
            error: None,
            timestamp: epoch_seconds(),
        }
    }
}

fn elapsed_ms(begun: Instant) -> f64 {
    begun.elapsed().as_secs_f64() * 1000.0
}
