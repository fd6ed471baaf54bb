//! # sixhop core
//!
//! Sharded, in-memory social-graph pathfinding engine: given two user
//! ids, returns a shortest connection path (at most six hops) over a
//! concurrently mutable friendship graph, backed by a thread-safe,
//! TTL-bounded result cache that is invalidated as the graph mutates.
//!
//! ## Architecture
//!
//! - [`graph::SocialGraph`]: one logical undirected graph over `S`
//!   shards with deterministic MD5-based routing
//! - [`search::BidirectionalBfs`]: meet-in-the-middle shortest-path
//!   search, capped at six degrees of separation
//! - [`cache::PathCache`]: endpoint-symmetric LRU/TTL cache of path
//!   results with per-user invalidation
//! - [`service::PathService`]: orchestration, metrics, and the wire
//!   response format
//!
//! ## Quick start
//!
//! ```rust
//! use sixhop_core::PathService;
//!
//! let service = PathService::new();
//! let alice = service.add_user("alice", "alice@example.com", None);
//! let bob = service.add_user("bob", "bob@example.com", None);
//! assert!(service.add_connection(&alice, &bob));
//!
//! let response = service.find_path(&alice, &bob, true);
//! assert!(response.found);
//! assert_eq!(response.degrees_of_separation, 1);
//! ```
//!
//! All interfaces are synchronous; concurrency control is internal
//! (per-shard locks, one cache lock, one metrics lock).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod config;
pub mod error;
pub mod graph;
pub mod model;
pub mod search;
pub mod service;

pub(crate) mod util;

#[cfg(test)]
mod service_tests;

pub use cache::{CacheStats, CachedPath, LruCache, PathCache, PathCacheStats};
pub use config::EngineConfig;
pub use error::{Error, Result};
pub use graph::{
    shard_for, GraphSnapshot, GraphStats, GraphView, SocialGraph, DEFAULT_NUM_SHARDS,
};
pub use model::User;
pub use search::{BidirectionalBfs, PathResult, DEFAULT_MAX_DEPTH};
pub use service::{HealthStatus, PathResponse, PathService, QueryMetrics, ServiceStats};
