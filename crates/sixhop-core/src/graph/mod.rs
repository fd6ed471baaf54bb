//! Sharded adjacency storage for the social graph.
//!
//! The graph is physically split into shards, each owning a disjoint
//! subset of users and their adjacency. Shard assignment is a pure
//! function of the user id (MD5-derived, see [`shard_for`]), so routing
//! is stable across processes and restarts.
//!
//! Shards themselves are plain data structures; [`SocialGraph`] wraps
//! each one in a `parking_lot::RwLock` and is the only component that
//! takes those locks. When an edge spans two shards, locks are acquired
//! in ascending shard-index order.

mod shard;
mod sharded;

#[cfg(test)]
mod shard_tests;

pub use shard::{Shard, ShardStats};
pub use sharded::{shard_for, GraphSnapshot, GraphStats, SocialGraph, DEFAULT_NUM_SHARDS};

use std::collections::HashSet;

/// Capability set a pathfinder needs from a graph.
///
/// An explicit interface rather than a concrete graph type, so the
/// search algorithms can run against any adjacency source (the sharded
/// store, fixtures in tests).
pub trait GraphView {
    /// Returns whether the user exists.
    fn has_user(&self, user_id: &str) -> bool;

    /// Returns an owned snapshot of the user's neighbourhood.
    ///
    /// The caller owns the returned set; implementations must not hand
    /// out live references to internal state (readers iterate without
    /// holding any lock).
    fn neighbors(&self, user_id: &str) -> HashSet<String>;
}
