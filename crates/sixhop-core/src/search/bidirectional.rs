//! Bidirectional breadth-first search.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::time::Instant;

use crate::graph::GraphView;

/// Default hard cap on returned path length (six degrees of separation).
pub const DEFAULT_MAX_DEPTH: u32 = 6;

/// Result of a pathfinding run.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    /// The path from start to target, inclusive; `None` when not found.
    pub path: Option<Vec<String>>,
    /// Number of edges on the path; −1 when not found.
    pub distance: i32,
    /// Vertices dequeued from either frontier during the search.
    pub nodes_explored: usize,
    /// Wall-clock time from entry to return, in milliseconds.
    pub execution_time_ms: f64,
    /// Whether a path was found.
    pub found: bool,
}

impl PathResult {
    /// Builds a successful result; distance derives from the path length.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn path_found(path: Vec<String>, nodes_explored: usize, execution_time_ms: f64) -> Self {
        let distance = path.len() as i32 - 1;
        Self {
            path: Some(path),
            distance,
            nodes_explored,
            execution_time_ms,
            found: true,
        }
    }

    /// Builds a not-found result. Unknown endpoints, unreachable
    /// targets, and depth-cap exhaustion all look the same here.
    #[must_use]
    pub fn not_found(nodes_explored: usize, execution_time_ms: f64) -> Self {
        Self {
            path: None,
            distance: -1,
            nodes_explored,
            execution_time_ms,
            found: false,
        }
    }
}

/// One half of the search: a frontier plus its parent and depth maps.
struct Half {
    frontier: VecDeque<String>,
    /// vertex → parent in this half; the root maps to `None`.
    visited: FxHashMap<String, Option<String>>,
    depths: FxHashMap<String, u32>,
    /// Completed levels.
    levels: u32,
}

impl Half {
    fn seeded(root: &str) -> Self {
        let mut visited = FxHashMap::default();
        visited.insert(root.to_string(), None);
        let mut depths = FxHashMap::default();
        depths.insert(root.to_string(), 0);
        Self {
            frontier: VecDeque::from([root.to_string()]),
            visited,
            depths,
            levels: 0,
        }
    }
}

/// Bidirectional BFS over a [`GraphView`].
///
/// Both halves expand strictly level-synchronously; each round the
/// half with the smaller frontier expands one full level (ties go to
/// the forward half). A vertex whose depth has reached `max_depth / 2`
/// is recorded but never expanded, which bounds the work per query at
/// `O(b^(max_depth/2))` neighbourhood reads and makes depth-cap
/// exhaustion indistinguishable from unreachability.
#[derive(Debug, Clone)]
pub struct BidirectionalBfs {
    max_depth: u32,
}

impl Default for BidirectionalBfs {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl BidirectionalBfs {
    /// Creates a searcher with the given diameter cap.
    #[must_use]
    pub fn new(max_depth: u32) -> Self {
        Self { max_depth }
    }

    /// Returns the diameter cap.
    #[must_use]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Finds a shortest path between two users.
    ///
    /// Missing users and unreachable targets are reported through
    /// `found = false`, never by unwinding. Each adjacency read sees a
    /// consistent per-vertex snapshot, but the graph may mutate during
    /// the search; every edge of a returned path existed at some
    /// instant during the call.
    pub fn search<G: GraphView>(&self, graph: &G, start: &str, target: &str) -> PathResult {
        let started = Instant::now();

        if start == target {
            return PathResult::path_found(vec![start.to_string()], 1, elapsed_ms(started));
        }
        if !graph.has_user(start) || !graph.has_user(target) {
            return PathResult::not_found(0, elapsed_ms(started));
        }

        let depth_cap = self.max_depth / 2;
        let mut forward = Half::seeded(start);
        let mut backward = Half::seeded(target);
        let mut nodes_explored = 0_usize;

        while !forward.frontier.is_empty()
            && !backward.frontier.is_empty()
            && forward.levels + backward.levels <= self.max_depth
        {
            // Balancing rule: always expand the smaller frontier.
            let meeting = if forward.frontier.len() <= backward.frontier.len() {
                expand_level(graph, &mut forward, &backward, depth_cap, &mut nodes_explored)
            } else {
                expand_level(graph, &mut backward, &forward, depth_cap, &mut nodes_explored)
            };

            if let Some(meeting) = meeting {
                let path = reconstruct(&meeting, &forward.visited, &backward.visited);
                tracing::debug!(
                    %start,
                    %target,
                    distance = path.len() - 1,
                    nodes_explored,
                    "path found"
                );
                return PathResult::path_found(path, nodes_explored, elapsed_ms(started));
            }
        }

        tracing::debug!(%start, %target, nodes_explored, "no path within depth cap");
        PathResult::not_found(nodes_explored, elapsed_ms(started))
    }
}

/// Expands exactly one BFS level of `own`.
///
/// Returns the meeting vertex as soon as a neighbour turns out to be
/// known to the other half. The meeting vertex is recorded in `own`'s
/// parent map first, so reconstruction can walk both halves through it.
fn expand_level<G: GraphView>(
    graph: &G,
    own: &mut Half,
    other: &Half,
    depth_cap: u32,
    nodes_explored: &mut usize,
) -> Option<String> {
    let mut next = VecDeque::new();

    while let Some(current) = own.frontier.pop_front() {
        *nodes_explored += 1;
        let depth = own.depths.get(&current).copied().unwrap_or(0);
        if depth >= depth_cap {
            continue;
        }

        for neighbor in graph.neighbors(&current) {
            if other.visited.contains_key(&neighbor) {
                own.visited
                    .entry(neighbor.clone())
                    .or_insert_with(|| Some(current.clone()));
                own.depths.entry(neighbor.clone()).or_insert(depth + 1);
                return Some(neighbor);
            }
            if !own.visited.contains_key(&neighbor) {
                own.visited
                    .insert(neighbor.clone(), Some(current.clone()));
                own.depths.insert(neighbor.clone(), depth + 1);
                next.push_back(neighbor);
            }
        }
    }

    own.frontier = next;
    own.levels += 1;
    None
}

/// Joins the two parent chains at the meeting vertex.
///
/// The prefix walks the forward map from the meeting vertex back to
/// the start and is reversed; the suffix walks the backward map from
/// the meeting vertex's backward parent to the target, so the meeting
/// vertex is emitted exactly once.
fn reconstruct(
    meeting: &str,
    forward_visited: &FxHashMap<String, Option<String>>,
    backward_visited: &FxHashMap<String, Option<String>>,
) -> Vec<String> {
    let mut path = Vec::new();

    let mut cursor = Some(meeting.to_string());
    while let Some(vertex) = cursor {
        cursor = forward_visited.get(&vertex).cloned().flatten();
        path.push(vertex);
    }
    path.reverse();

    let mut cursor = backward_visited.get(meeting).cloned().flatten();
    while let Some(vertex) = cursor {
        cursor = backward_visited.get(&vertex).cloned().flatten();
        path.push(vertex);
    }

    path
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
