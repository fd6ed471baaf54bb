//! Tests for the pathfinding service.

use super::config::EngineConfig;
use super::service::PathService;

/// Service over a small fixed graph: u1 - u2 - u3 - u4.
fn chain_service() -> PathService {
    let service = PathService::new();
    for id in ["u1", "u2", "u3", "u4"] {
        service.add_user(id, &format!("{id}@example.com"), Some(id));
    }
    assert!(service.add_connection("u1", "u2"));
    assert!(service.add_connection("u2", "u3"));
    assert!(service.add_connection("u3", "u4"));
    service
}

#[test]
fn find_path_returns_wire_fields() {
    let service = chain_service();
    let response = service.find_path("u1", "u4", true);

    assert!(response.found);
    assert_eq!(response.degrees_of_separation, 3);
    assert_eq!(
        response.path.as_deref(),
        Some(&["u1".to_string(), "u2".into(), "u3".into(), "u4".into()][..])
    );
    assert!(!response.from_cache);
    assert_eq!(response.start_user_id, "u1");
    assert_eq!(response.target_user_id, "u4");
    assert!(response.timestamp > 1_704_000_000.0);
    assert!(response.service_response_time_ms >= response.algorithm_execution_time_ms);
}

#[test]
fn second_query_is_served_from_cache() {
    let service = chain_service();
    let first = service.find_path("u1", "u4", true);
    assert!(!first.from_cache);

    let second = service.find_path("u1", "u4", true);
    assert!(second.from_cache);
    assert_eq!(second.path, first.path);

    let stats = service.stats();
    assert_eq!(stats.service.total_queries, 2);
    assert_eq!(stats.service.cache_hits, 1);
    assert_eq!(stats.service.cache_misses, 1);
    assert_eq!(stats.service.successful_queries, 2);
}

#[test]
fn reversed_query_hits_the_same_entry() {
    let service = chain_service();
    let _ = service.find_path("u1", "u4", true);

    let reversed = service.find_path("u4", "u1", true);
    assert!(reversed.from_cache);
    assert_eq!(reversed.degrees_of_separation, 3);
    assert_eq!(
        reversed.path.as_deref(),
        Some(&["u4".to_string(), "u3".into(), "u2".into(), "u1".into()][..])
    );
    assert_eq!(reversed.start_user_id, "u4");
    assert_eq!(reversed.target_user_id, "u1");
}

#[test]
fn bypassing_the_cache_never_stores_or_hits() {
    let service = chain_service();
    let _ = service.find_path("u1", "u4", false);
    let again = service.find_path("u1", "u4", false);
    assert!(!again.from_cache);

    let stats = service.stats();
    assert_eq!(stats.service.cache_hits, 0);
    assert_eq!(stats.service.cache_misses, 0);
    assert_eq!(stats.cache.size, 0);
}

#[test]
fn failed_lookup_is_counted_and_not_cached() {
    let service = chain_service();
    let response = service.find_path("u1", "nobody", true);
    assert!(!response.found);
    assert_eq!(response.degrees_of_separation, -1);

    let stats = service.stats();
    assert_eq!(stats.service.failed_queries, 1);
    assert_eq!(stats.cache.size, 0);
}

#[test]
fn mutation_invalidates_cached_paths() {
    let service = chain_service();
    let _ = service.find_path("u1", "u4", true);
    assert!(service.remove_connection("u2", "u3"));

    let fresh = service.find_path("u1", "u4", true);
    assert!(!fresh.from_cache);
    assert!(!fresh.found);
}

#[test]
fn adding_a_shortcut_invalidates_the_stale_path() {
    let service = chain_service();
    let before = service.find_path("u1", "u4", true);
    assert_eq!(before.degrees_of_separation, 3);

    assert!(service.add_connection("u1", "u4"));
    let after = service.find_path("u1", "u4", true);
    assert!(!after.from_cache);
    assert_eq!(after.degrees_of_separation, 1);
}

#[test]
fn degrees_of_separation_shortcut() {
    let service = chain_service();
    assert_eq!(service.degrees_of_separation("u1", "u3"), 2);
    assert_eq!(service.degrees_of_separation("u1", "nobody"), -1);
}

#[test]
fn batch_results_are_keyed_start_colon_target() {
    let service = chain_service();
    let pairs = vec![
        ("u1".to_string(), "u2".to_string()),
        ("u1".to_string(), "u4".to_string()),
        ("u1".to_string(), "ghost".to_string()),
    ];
    let results = service.batch_find_paths(&pairs);

    assert_eq!(results.len(), 3);
    assert!(results["u1:u2"].found);
    assert!(results["u1:u4"].found);
    assert!(!results["u1:ghost"].found);
}

#[test]
fn idle_service_reports_zero_rates() {
    let service = PathService::new();
    let stats = service.stats();
    assert_eq!(stats.service.total_queries, 0);
    assert!((stats.cache_hit_rate - 0.0).abs() < f64::EPSILON);
    assert!((stats.success_rate - 0.0).abs() < f64::EPSILON);
}

#[test]
fn rates_follow_counters() {
    let service = chain_service();
    let _ = service.find_path("u1", "u4", true); // miss, success
    let _ = service.find_path("u1", "u4", true); // hit, success
    let _ = service.find_path("u1", "ghost", true); // miss, failure

    let stats = service.stats();
    assert_eq!(stats.service.total_queries, 3);
    assert!((stats.cache_hit_rate - 1.0 / 3.0).abs() < 1e-9);
    assert!((stats.success_rate - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn health_is_infallible_and_healthy() {
    let service = PathService::new();
    let health = service.health();
    assert!(health.healthy);
    assert!(health.graph);
    assert!(health.cache);
    assert!(health.error.is_none());
}

#[test]
fn caching_disabled_service_never_caches() {
    let service = PathService::new().with_caching(false);
    for id in ["a", "b"] {
        service.add_user(id, &format!("{id}@example.com"), Some(id));
    }
    service.add_connection("a", "b");

    let _ = service.find_path("a", "b", true);
    let again = service.find_path("a", "b", true);
    assert!(!again.from_cache);
    assert_eq!(service.stats().cache.size, 0);
}

#[test]
fn mutual_connections_through_service() {
    let service = chain_service();
    let mutuals = service.mutual_connections("u1", "u3");
    assert_eq!(mutuals.len(), 1);
    assert!(mutuals.contains("u2"));
}

#[test]
fn from_config_respects_depth_cap() {
    let config = EngineConfig::from_toml("[search]\nmax_depth = 2").expect("valid toml");
    let service = PathService::from_config(&config);
    for id in ["u1", "u2", "u3", "u4", "u5"] {
        service.add_user(id, &format!("{id}@example.com"), Some(id));
    }
    service.add_connection("u1", "u2");
    service.add_connection("u2", "u3");
    service.add_connection("u3", "u4");
    service.add_connection("u4", "u5");

    assert!(service.find_path("u1", "u2", true).found);
    assert!(!service.find_path("u1", "u5", true).found);
}
