//! End-to-end scenarios through the public service API.

use sixhop_core::{shard_for, PathService};

/// Builds a service holding the chain u1 - u2 - … - u{n}.
fn chain_service(n: usize) -> PathService {
    let service = PathService::new();
    let ids: Vec<String> = (1..=n).map(|i| format!("u{i}")).collect();
    for id in &ids {
        service.add_user(id, &format!("{id}@example.com"), Some(id));
    }
    for pair in ids.windows(2) {
        assert!(service.add_connection(&pair[0], &pair[1]));
    }
    service
}

#[test]
fn direct_edge() {
    let service = chain_service(2);
    let response = service.find_path("u1", "u2", true);

    assert!(response.found);
    assert_eq!(response.degrees_of_separation, 1);
    assert_eq!(
        response.path.as_deref(),
        Some(&["u1".to_string(), "u2".into()][..])
    );
}

#[test]
fn chain_of_four() {
    let service = chain_service(4);
    let response = service.find_path("u1", "u4", true);

    assert!(response.found);
    assert_eq!(response.degrees_of_separation, 3);
    assert_eq!(
        response.path.as_deref(),
        Some(&["u1".to_string(), "u2".into(), "u3".into(), "u4".into()][..])
    );
}

#[test]
fn just_beyond_diameter() {
    // Seven edges between u1 and u8: one more than the cap of six.
    let service = chain_service(8);
    let response = service.find_path("u1", "u8", true);

    assert!(!response.found);
    assert_eq!(response.degrees_of_separation, -1);
    assert!(response.path.is_none());
}

#[test]
fn cache_symmetry() {
    let service = chain_service(4);
    let warm = service.find_path("u1", "u4", true);
    assert!(warm.found);
    assert!(!warm.from_cache);

    let reversed = service.find_path("u4", "u1", true);
    assert!(reversed.from_cache);
    assert_eq!(reversed.degrees_of_separation, 3);
    assert_eq!(
        reversed.path.as_deref(),
        Some(&["u4".to_string(), "u3".into(), "u2".into(), "u1".into()][..])
    );
}

#[test]
fn invalidation_on_mutation() {
    let service = chain_service(4);
    let _ = service.find_path("u1", "u4", true);
    let _ = service.find_path("u4", "u1", true);

    assert!(service.remove_connection("u2", "u3"));

    let fresh = service.find_path("u1", "u4", true);
    assert!(!fresh.from_cache);
    assert!(!fresh.found);
    assert_eq!(fresh.degrees_of_separation, -1);
}

#[test]
fn shard_routing_determinism() {
    // Stable across restarts and across implementations of the
    // MD5-mod-S contract.
    assert_eq!(shard_for("00000000-0000-4000-8000-00000000aaaa", 4), 1);
    assert_eq!(shard_for("00000000-0000-4000-8000-00000000bbbb", 4), 1);
    for id in ["u1", "u2", "alice", "bob"] {
        assert_eq!(shard_for(id, 4), shard_for(id, 4));
        assert!(shard_for(id, 4) < 4);
    }
}

#[test]
fn invalidation_is_complete_for_both_endpoints() {
    let service = chain_service(6);
    // Warm several entries that involve u3 on either side of the key.
    let _ = service.find_path("u1", "u3", true);
    let _ = service.find_path("u3", "u5", true);
    let _ = service.find_path("u2", "u4", true); // does not involve u3 as endpoint
    assert_eq!(service.stats().cache.size, 3);

    // Mutating a u3 edge must drop every entry keyed on u3.
    assert!(service.add_connection("u3", "u6"));

    let first = service.find_path("u1", "u3", true);
    assert!(!first.from_cache);
    let second = service.find_path("u3", "u5", true);
    assert!(!second.from_cache);
    // The untouched pair is still warm.
    let third = service.find_path("u2", "u4", true);
    assert!(third.from_cache);
}

#[test]
fn returned_paths_walk_real_edges() {
    let service = chain_service(5);
    // A few chords so several routes exist.
    assert!(service.add_connection("u1", "u3"));
    assert!(service.add_connection("u2", "u5"));

    for (start, target) in [("u1", "u5"), ("u5", "u1"), ("u1", "u4"), ("u3", "u5")] {
        let response = service.find_path(start, target, false);
        assert!(response.found, "{start} -> {target} should be reachable");
        let path = response.path.expect("path present");
        assert_eq!(path.first().map(String::as_str), Some(start));
        assert_eq!(path.last().map(String::as_str), Some(target));
        for pair in path.windows(2) {
            assert!(
                service.connections_of(&pair[0]).contains(&pair[1]),
                "{} and {} are not adjacent",
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn double_add_then_remove_is_clean() {
    let service = chain_service(2);
    // Second add is a duplicate.
    assert!(!service.add_connection("u1", "u2"));
    // One remove clears it, the second finds nothing.
    assert!(service.remove_connection("u1", "u2"));
    assert!(!service.remove_connection("u1", "u2"));
    assert!(service.connections_of("u1").is_empty());
    assert!(service.connections_of("u2").is_empty());
}

#[test]
fn self_query_through_the_service() {
    let service = chain_service(2);
    let response = service.find_path("u1", "u1", true);
    assert!(response.found);
    assert_eq!(response.degrees_of_separation, 0);
    assert_eq!(response.path.as_deref(), Some(&["u1".to_string()][..]));
}

#[test]
fn unknown_users_do_not_error() {
    let service = chain_service(2);
    let response = service.find_path("ghost", "u2", true);
    assert!(!response.found);
    assert_eq!(response.degrees_of_separation, -1);
    assert_eq!(response.start_user_id, "ghost");
}
