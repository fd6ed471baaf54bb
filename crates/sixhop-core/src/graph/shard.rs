//! A single partition of the social graph.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::collections::HashSet;

use crate::model::User;

/// Per-shard statistics.
///
/// Edge counts are adjacency endpoints owned by this shard, split by
/// whether the neighbour lives on the same shard (`local_edges`) or a
/// different one (`remote_edges`). Every undirected edge contributes
/// one endpoint to each of its two owning shards.
#[derive(Debug, Clone, Serialize)]
pub struct ShardStats {
    /// Shard index.
    pub shard_id: usize,
    /// Number of users owned by this shard.
    pub users: usize,
    /// Adjacency endpoints whose neighbour is on the same shard.
    pub local_edges: usize,
    /// Adjacency endpoints whose neighbour is on a different shard.
    pub remote_edges: usize,
}

/// One partition of the graph: the users it owns and their adjacency.
///
/// A shard is a plain data structure with no interior locking; the
/// owning [`super::SocialGraph`] serialises access through a per-shard
/// `RwLock`. Neighbours on other shards are tagged with the target
/// shard index (informational only, used for cross-shard statistics).
#[derive(Debug)]
pub struct Shard {
    id: usize,
    users: FxHashMap<String, User>,
    local: FxHashMap<String, FxHashSet<String>>,
    remote: FxHashMap<String, FxHashMap<String, usize>>,
}

impl Shard {
    /// Creates an empty shard with the given index.
    #[must_use]
    pub fn new(id: usize) -> Self {
        Self {
            id,
            users: FxHashMap::default(),
            local: FxHashMap::default(),
            remote: FxHashMap::default(),
        }
    }

    /// Returns the shard index.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Inserts a user if absent. Returns whether the user was inserted.
    pub fn insert_user(&mut self, user: User) -> bool {
        if self.users.contains_key(user.user_id()) {
            return false;
        }
        let id = user.user_id().to_string();
        self.users.insert(id.clone(), user);
        self.local.entry(id.clone()).or_default();
        self.remote.entry(id).or_default();
        true
    }

    /// Returns whether this shard owns the user.
    #[must_use]
    pub fn contains_user(&self, user_id: &str) -> bool {
        self.users.contains_key(user_id)
    }

    /// Returns the user record, if owned by this shard.
    #[must_use]
    pub fn get_user(&self, user_id: &str) -> Option<&User> {
        self.users.get(user_id)
    }

    /// Number of users owned by this shard.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Records `neighbor` in `user_id`'s adjacency.
    ///
    /// `neighbor_shard` decides the local/remote split. Requires
    /// `user_id` to be owned by this shard; returns `false` for an
    /// unknown user or an already-present neighbour, `true` when the
    /// endpoint was newly inserted.
    pub fn connect(&mut self, user_id: &str, neighbor: &str, neighbor_shard: usize) -> bool {
        if !self.users.contains_key(user_id) {
            return false;
        }
        if neighbor_shard == self.id {
            self.local
                .entry(user_id.to_string())
                .or_default()
                .insert(neighbor.to_string())
        } else {
            self.remote
                .entry(user_id.to_string())
                .or_default()
                .insert(neighbor.to_string(), neighbor_shard)
                .is_none()
        }
    }

    /// Removes `neighbor` from `user_id`'s adjacency.
    ///
    /// Returns whether the endpoint was present.
    pub fn disconnect(&mut self, user_id: &str, neighbor: &str) -> bool {
        let from_local = self
            .local
            .get_mut(user_id)
            .is_some_and(|set| set.remove(neighbor));
        let from_remote = self
            .remote
            .get_mut(user_id)
            .is_some_and(|map| map.remove(neighbor).is_some());
        from_local || from_remote
    }

    /// Returns whether `neighbor` appears in `user_id`'s adjacency.
    #[must_use]
    pub fn has_neighbor(&self, user_id: &str, neighbor: &str) -> bool {
        self.local
            .get(user_id)
            .is_some_and(|set| set.contains(neighbor))
            || self
                .remote
                .get(user_id)
                .is_some_and(|map| map.contains_key(neighbor))
    }

    /// Returns an owned copy of `user_id`'s full neighbourhood.
    ///
    /// Empty for unknown users. The copy lets callers iterate without
    /// holding the shard lock.
    #[must_use]
    pub fn neighbors(&self, user_id: &str) -> HashSet<String> {
        let mut out = HashSet::new();
        if let Some(set) = self.local.get(user_id) {
            out.extend(set.iter().cloned());
        }
        if let Some(map) = self.remote.get(user_id) {
            out.extend(map.keys().cloned());
        }
        out
    }

    /// Number of neighbours of `user_id` (0 for unknown users).
    #[must_use]
    pub fn degree(&self, user_id: &str) -> usize {
        self.local.get(user_id).map_or(0, FxHashSet::len)
            + self.remote.get(user_id).map_or(0, FxHashMap::len)
    }

    /// Iterates over the users owned by this shard.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Iterates over `(user_id, neighbor_id)` adjacency endpoints.
    pub fn adjacency(&self) -> impl Iterator<Item = (&str, &str)> {
        let local = self
            .local
            .iter()
            .flat_map(|(u, set)| set.iter().map(move |v| (u.as_str(), v.as_str())));
        let remote = self
            .remote
            .iter()
            .flat_map(|(u, map)| map.keys().map(move |v| (u.as_str(), v.as_str())));
        local.chain(remote)
    }

    /// Removes all users and adjacency from this shard.
    pub fn clear(&mut self) {
        self.users.clear();
        self.local.clear();
        self.remote.clear();
    }

    /// Returns statistics for this shard.
    #[must_use]
    pub fn stats(&self) -> ShardStats {
        ShardStats {
            shard_id: self.id,
            users: self.users.len(),
            local_edges: self.local.values().map(FxHashSet::len).sum(),
            remote_edges: self.remote.values().map(FxHashMap::len).sum(),
        }
    }
}
