//! The logical graph composed of shards.

#![allow(clippy::cast_precision_loss)] // Precision loss acceptable for ratio/average stats

use md5::{Digest, Md5};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use super::shard::{Shard, ShardStats};
use super::GraphView;
use crate::error::{Error, Result};
use crate::model::User;

/// Default number of adjacency partitions.
pub const DEFAULT_NUM_SHARDS: usize = 4;

/// Returns the shard index owning `user_id`.
///
/// The MD5 digest of the id bytes is interpreted as a big-endian
/// unsigned integer and reduced `mod num_shards` by byte folding, so
/// the result is identical across processes and implementations.
///
/// # Panics
///
/// Panics if `num_shards` is 0.
#[must_use]
pub fn shard_for(user_id: &str, num_shards: usize) -> usize {
    assert!(num_shards > 0, "num_shards must be at least 1");
    let digest = Md5::digest(user_id.as_bytes());
    let modulus = num_shards as u128;
    let folded = digest
        .iter()
        .fold(0u128, |acc, &byte| (acc * 256 + u128::from(byte)) % modulus);
    usize::try_from(folded).expect("folded value is below num_shards")
}

/// Aggregate graph statistics.
#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    /// Total users across all shards.
    pub total_users: usize,
    /// Total undirected edges.
    pub total_edges: usize,
    /// Adjacency reads served since startup.
    pub adjacency_reads: u64,
    /// Mean number of neighbours per user.
    pub average_degree: f64,
    /// Number of shards.
    pub num_shards: usize,
    /// Fraction of adjacency endpoints whose neighbour lives on a
    /// different shard: `cross / (local + cross)`, 0 when edge-free.
    pub cross_shard_ratio: f64,
    /// Per-shard breakdown.
    pub shards: Vec<ShardStats>,
}

/// Serializable image of the whole graph.
///
/// An in-memory value, not a storage format: `edges` lists each
/// undirected edge once with its endpoints in lexicographic order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Every user record.
    pub users: Vec<User>,
    /// Every undirected edge, endpoints sorted lexicographically.
    pub edges: Vec<(String, String)>,
}

/// A single logical undirected graph over `S` shards.
///
/// Each shard is guarded by its own `RwLock`; mutations touching two
/// shards acquire both write locks in ascending shard-index order, so
/// lock acquisition can never cycle. Reads ([`Self::neighbors`]) take
/// one read lock, copy, and release: a reader never holds a shard
/// lock while waiting on another shard.
pub struct SocialGraph {
    shards: Vec<RwLock<Shard>>,
    num_shards: usize,
    adjacency_reads: AtomicU64,
}

impl SocialGraph {
    /// Creates a graph with the default number of shards.
    #[must_use]
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_NUM_SHARDS)
    }

    /// Creates a graph with a specific number of shards.
    ///
    /// # Panics
    ///
    /// Panics if `num_shards` is 0.
    #[must_use]
    pub fn with_shards(num_shards: usize) -> Self {
        assert!(num_shards > 0, "num_shards must be at least 1");
        let shards = (0..num_shards).map(|i| RwLock::new(Shard::new(i))).collect();
        Self {
            shards,
            num_shards,
            adjacency_reads: AtomicU64::new(0),
        }
    }

    /// Returns the number of shards.
    #[must_use]
    pub fn num_shards(&self) -> usize {
        self.num_shards
    }

    /// Returns the shard index owning `user_id`.
    #[must_use]
    pub fn shard_of(&self, user_id: &str) -> usize {
        shard_for(user_id, self.num_shards)
    }

    /// Adds a user, minting a fresh v4 UUID when `user_id` is `None`.
    ///
    /// Idempotent per id: re-adding an existing id leaves the stored
    /// record untouched. Returns the effective user id.
    pub fn add_user(&self, username: &str, email: &str, user_id: Option<&str>) -> String {
        let id = user_id.map_or_else(|| uuid::Uuid::new_v4().to_string(), str::to_string);
        let user = User::new(&id, username, email);
        let inserted = self.shards[self.shard_of(&id)].write().insert_user(user);
        if inserted {
            tracing::debug!(user_id = %id, shard = self.shard_of(&id), "user added");
        }
        id
    }

    /// Returns whether the user exists.
    #[must_use]
    pub fn has_user(&self, user_id: &str) -> bool {
        self.shards[self.shard_of(user_id)]
            .read()
            .contains_user(user_id)
    }

    /// Returns a copy of the user record, if it exists.
    #[must_use]
    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.shards[self.shard_of(user_id)]
            .read()
            .get_user(user_id)
            .cloned()
    }

    /// Adds the undirected edge `{a, b}`.
    ///
    /// Returns `false` for a self-loop, an unknown endpoint, or an
    /// already-present edge. Both adjacency sides are updated under
    /// the relevant shard locks, keeping symmetry atomic.
    pub fn add_edge(&self, a: &str, b: &str) -> bool {
        if a == b {
            return false;
        }
        let (shard_a, shard_b) = (self.shard_of(a), self.shard_of(b));
        let inserted = if shard_a == shard_b {
            let mut guard = self.shards[shard_a].write();
            if !guard.contains_user(a) || !guard.contains_user(b) {
                return false;
            }
            let new_a = guard.connect(a, b, shard_b);
            let new_b = guard.connect(b, a, shard_a);
            debug_assert_eq!(new_a, new_b, "edge sides out of sync");
            new_a || new_b
        } else {
            // Lower shard index locked first, so cross-shard writers
            // can never deadlock against each other.
            let (lo, hi) = if shard_a < shard_b {
                (shard_a, shard_b)
            } else {
                (shard_b, shard_a)
            };
            let mut lo_guard = self.shards[lo].write();
            let mut hi_guard = self.shards[hi].write();
            let (guard_a, guard_b) = if shard_a == lo {
                (&mut lo_guard, &mut hi_guard)
            } else {
                (&mut hi_guard, &mut lo_guard)
            };
            if !guard_a.contains_user(a) || !guard_b.contains_user(b) {
                return false;
            }
            let new_a = guard_a.connect(a, b, shard_b);
            let new_b = guard_b.connect(b, a, shard_a);
            debug_assert_eq!(new_a, new_b, "edge sides out of sync");
            new_a || new_b
        };
        if inserted {
            tracing::debug!(%a, %b, "edge added");
        }
        inserted
    }

    /// Removes the undirected edge `{a, b}`.
    ///
    /// Returns `true` only if both endpoints previously contained each
    /// other.
    pub fn remove_edge(&self, a: &str, b: &str) -> bool {
        if a == b {
            return false;
        }
        let (shard_a, shard_b) = (self.shard_of(a), self.shard_of(b));
        let removed = if shard_a == shard_b {
            let mut guard = self.shards[shard_a].write();
            let gone_a = guard.disconnect(a, b);
            let gone_b = guard.disconnect(b, a);
            gone_a && gone_b
        } else {
            let (lo, hi) = if shard_a < shard_b {
                (shard_a, shard_b)
            } else {
                (shard_b, shard_a)
            };
            let mut lo_guard = self.shards[lo].write();
            let mut hi_guard = self.shards[hi].write();
            let (guard_a, guard_b) = if shard_a == lo {
                (&mut lo_guard, &mut hi_guard)
            } else {
                (&mut hi_guard, &mut lo_guard)
            };
            let gone_a = guard_a.disconnect(a, b);
            let gone_b = guard_b.disconnect(b, a);
            gone_a && gone_b
        };
        if removed {
            tracing::debug!(%a, %b, "edge removed");
        }
        removed
    }

    /// Returns whether the undirected edge `{a, b}` exists.
    #[must_use]
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.shards[self.shard_of(a)].read().has_neighbor(a, b)
    }

    /// Returns an owned snapshot of `user_id`'s neighbourhood.
    ///
    /// Empty for unknown users; never fails. The snapshot is taken
    /// under a single shard read lock which is released before return.
    #[must_use]
    pub fn neighbors(&self, user_id: &str) -> HashSet<String> {
        self.adjacency_reads.fetch_add(1, Ordering::Relaxed);
        self.shards[self.shard_of(user_id)]
            .read()
            .neighbors(user_id)
    }

    /// Number of neighbours of `user_id` (0 for unknown users).
    #[must_use]
    pub fn degree(&self, user_id: &str) -> usize {
        self.shards[self.shard_of(user_id)].read().degree(user_id)
    }

    /// Users connected to both `a` and `b`.
    #[must_use]
    pub fn mutual_connections(&self, a: &str, b: &str) -> HashSet<String> {
        let neighbors_a = self.neighbors(a);
        let neighbors_b = self.neighbors(b);
        neighbors_a.intersection(&neighbors_b).cloned().collect()
    }

    /// Adds many users at once, minting an id for each.
    ///
    /// Returns the minted ids in input order.
    pub fn bulk_add_users(&self, users: &[(String, String)]) -> Vec<String> {
        users
            .iter()
            .map(|(username, email)| self.add_user(username, email, None))
            .collect()
    }

    /// Adds many edges at once. Returns how many were newly inserted.
    pub fn bulk_add_edges(&self, pairs: &[(String, String)]) -> usize {
        pairs.iter().filter(|(a, b)| self.add_edge(a, b)).count()
    }

    /// Returns aggregate statistics.
    #[must_use]
    pub fn stats(&self) -> GraphStats {
        let shards: Vec<ShardStats> = self.shards.iter().map(|s| s.read().stats()).collect();
        let total_users: usize = shards.iter().map(|s| s.users).sum();
        let local: usize = shards.iter().map(|s| s.local_edges).sum();
        let remote: usize = shards.iter().map(|s| s.remote_edges).sum();
        let endpoints = local + remote;
        let total_edges = endpoints / 2;
        let cross_shard_ratio = if endpoints == 0 {
            0.0
        } else {
            remote as f64 / endpoints as f64
        };
        GraphStats {
            total_users,
            total_edges,
            adjacency_reads: self.adjacency_reads.load(Ordering::Relaxed),
            average_degree: total_edges as f64 / total_users.max(1) as f64,
            num_shards: self.num_shards,
            cross_shard_ratio,
            shards,
        }
    }

    /// Captures a serializable image of the whole graph.
    #[must_use]
    pub fn snapshot(&self) -> GraphSnapshot {
        let mut users = Vec::new();
        let mut edges: HashSet<(String, String)> = HashSet::new();
        for shard in &self.shards {
            let guard = shard.read();
            users.extend(guard.users().cloned());
            for (u, v) in guard.adjacency() {
                let pair = if u <= v {
                    (u.to_string(), v.to_string())
                } else {
                    (v.to_string(), u.to_string())
                };
                edges.insert(pair);
            }
        }
        let mut edges: Vec<(String, String)> = edges.into_iter().collect();
        edges.sort();
        GraphSnapshot { users, edges }
    }

    /// Replaces the graph contents with a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if an edge references a user the snapshot does
    /// not contain; the graph is left holding the snapshot's users and
    /// the edges processed so far.
    pub fn restore(&self, snapshot: &GraphSnapshot) -> Result<()> {
        for shard in &self.shards {
            shard.write().clear();
        }
        for user in &snapshot.users {
            let shard = self.shard_of(user.user_id());
            self.shards[shard].write().insert_user(user.clone());
        }
        for (a, b) in &snapshot.edges {
            if !self.add_edge(a, b) {
                return Err(Error::Serialization(format!(
                    "snapshot edge ({a}, {b}) references an unknown user or duplicates an edge"
                )));
            }
        }
        tracing::info!(
            users = snapshot.users.len(),
            edges = snapshot.edges.len(),
            "graph restored from snapshot"
        );
        Ok(())
    }
}

impl Default for SocialGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphView for SocialGraph {
    fn has_user(&self, user_id: &str) -> bool {
        Self::has_user(self, user_id)
    }

    fn neighbors(&self, user_id: &str) -> HashSet<String> {
        self.neighbors(user_id)
    }
}
