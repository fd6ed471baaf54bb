//! Tests for a single shard.

use super::shard::Shard;
use crate::model::User;

fn user(id: &str) -> User {
    User::new(id, id, &format!("{id}@example.com"))
}

#[test]
fn insert_user_is_idempotent() {
    let mut shard = Shard::new(0);
    assert!(shard.insert_user(user("u1")));
    assert!(!shard.insert_user(user("u1")));
    assert_eq!(shard.user_count(), 1);
    assert!(shard.contains_user("u1"));
}

#[test]
fn connect_requires_known_user() {
    let mut shard = Shard::new(0);
    assert!(!shard.connect("stranger", "u2", 0));
    shard.insert_user(user("u1"));
    assert!(shard.connect("u1", "u2", 0));
}

#[test]
fn connect_classifies_local_and_remote() {
    let mut shard = Shard::new(0);
    shard.insert_user(user("u1"));
    assert!(shard.connect("u1", "same-shard", 0));
    assert!(shard.connect("u1", "other-shard", 3));

    let stats = shard.stats();
    assert_eq!(stats.shard_id, 0);
    assert_eq!(stats.users, 1);
    assert_eq!(stats.local_edges, 1);
    assert_eq!(stats.remote_edges, 1);
}

#[test]
fn connect_twice_is_not_new() {
    let mut shard = Shard::new(0);
    shard.insert_user(user("u1"));
    assert!(shard.connect("u1", "u2", 0));
    assert!(!shard.connect("u1", "u2", 0));
    assert!(shard.connect("u1", "u3", 1));
    assert!(!shard.connect("u1", "u3", 1));
    assert_eq!(shard.degree("u1"), 2);
}

#[test]
fn disconnect_reports_presence() {
    let mut shard = Shard::new(0);
    shard.insert_user(user("u1"));
    shard.connect("u1", "local", 0);
    shard.connect("u1", "remote", 2);

    assert!(shard.disconnect("u1", "local"));
    assert!(!shard.disconnect("u1", "local"));
    assert!(shard.disconnect("u1", "remote"));
    assert_eq!(shard.degree("u1"), 0);
}

#[test]
fn neighbors_is_an_owned_union() {
    let mut shard = Shard::new(1);
    shard.insert_user(user("u1"));
    shard.connect("u1", "a", 1);
    shard.connect("u1", "b", 0);

    let mut snapshot = shard.neighbors("u1");
    assert_eq!(snapshot.len(), 2);
    assert!(snapshot.contains("a"));
    assert!(snapshot.contains("b"));

    // Mutating the snapshot cannot reach shard state.
    snapshot.clear();
    assert_eq!(shard.degree("u1"), 2);
}

#[test]
fn neighbors_of_unknown_user_is_empty() {
    let shard = Shard::new(0);
    assert!(shard.neighbors("nobody").is_empty());
    assert_eq!(shard.degree("nobody"), 0);
}

#[test]
fn has_neighbor_spans_both_splits() {
    let mut shard = Shard::new(0);
    shard.insert_user(user("u1"));
    shard.connect("u1", "local", 0);
    shard.connect("u1", "remote", 1);
    assert!(shard.has_neighbor("u1", "local"));
    assert!(shard.has_neighbor("u1", "remote"));
    assert!(!shard.has_neighbor("u1", "other"));
}

#[test]
fn adjacency_lists_every_endpoint() {
    let mut shard = Shard::new(0);
    shard.insert_user(user("u1"));
    shard.insert_user(user("u2"));
    shard.connect("u1", "u2", 0);
    shard.connect("u2", "u1", 0);
    shard.connect("u1", "elsewhere", 2);

    let endpoints: Vec<(String, String)> = shard
        .adjacency()
        .map(|(u, v)| (u.to_string(), v.to_string()))
        .collect();
    assert_eq!(endpoints.len(), 3);
    assert!(endpoints.contains(&("u1".to_string(), "u2".to_string())));
    assert!(endpoints.contains(&("u2".to_string(), "u1".to_string())));
    assert!(endpoints.contains(&("u1".to_string(), "elsewhere".to_string())));
}

#[test]
fn clear_empties_everything() {
    let mut shard = Shard::new(0);
    shard.insert_user(user("u1"));
    shard.connect("u1", "u2", 0);
    shard.clear();
    assert_eq!(shard.user_count(), 0);
    assert_eq!(shard.degree("u1"), 0);
}
