//! Benchmarks for the pathfinding hot paths: adjacency reads,
//! bidirectional search, and cache-served queries.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sixhop_core::{BidirectionalBfs, PathService, SocialGraph};
use std::sync::Arc;

/// Ring of `n` users with chords every `stride`, so searches have both
/// depth and branching to chew on.
fn build_graph(n: usize, stride: usize) -> (Arc<SocialGraph>, Vec<String>) {
    let graph = Arc::new(SocialGraph::new());
    let ids: Vec<String> = (0..n).map(|i| format!("user-{i}")).collect();
    for id in &ids {
        graph.add_user(id, &format!("{id}@example.com"), Some(id));
    }
    for i in 0..n {
        graph.add_edge(&ids[i], &ids[(i + 1) % n]);
        graph.add_edge(&ids[i], &ids[(i + stride) % n]);
    }
    (graph, ids)
}

fn bench_neighbors(c: &mut Criterion) {
    let (graph, ids) = build_graph(10_000, 37);
    c.bench_function("neighbors_10k", |b| {
        b.iter(|| {
            for id in ids.iter().step_by(101) {
                black_box(graph.neighbors(id));
            }
        });
    });
}

fn bench_search(c: &mut Criterion) {
    let (graph, ids) = build_graph(10_000, 37);
    let bfs = BidirectionalBfs::default();

    c.bench_function("bibfs_near", |b| {
        b.iter(|| black_box(bfs.search(graph.as_ref(), &ids[0], &ids[2])));
    });
    c.bench_function("bibfs_far", |b| {
        b.iter(|| black_box(bfs.search(graph.as_ref(), &ids[0], &ids[5_000])));
    });
}

fn bench_cached_queries(c: &mut Criterion) {
    let (graph, ids) = build_graph(2_000, 23);
    let service = PathService::with_graph(graph, &sixhop_core::EngineConfig::default());

    // Warm the entry once; the bench measures cache-served responses.
    let _ = service.find_path(&ids[0], &ids[500], true);
    c.bench_function("find_path_cached", |b| {
        b.iter(|| black_box(service.find_path(&ids[0], &ids[500], true)));
    });
}

criterion_group!(
    benches,
    bench_neighbors,
    bench_search,
    bench_cached_queries
);
criterion_main!(benches);
