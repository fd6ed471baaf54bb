//! Pathfinding handlers.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::types::{BatchPathsRequest, PathQuery};
use crate::AppState;

/// Find a shortest path between two users.
///
/// Unknown users and unreachable targets are regular answers with
/// `found: false`, returned with status 200.
#[utoipa::path(
    get,
    path = "/paths/{start}/{target}",
    tag = "paths",
    params(
        ("start" = String, Path, description = "Start user id"),
        ("target" = String, Path, description = "Target user id"),
        ("use_cache" = Option<bool>, Query, description = "Consult the result cache (default true)")
    ),
    responses(
        (status = 200, description = "Path query result", body = Object)
    )
)]
pub async fn find_path(
    State(state): State<Arc<AppState>>,
    Path((start, target)): Path<(String, String)>,
    Query(query): Query<PathQuery>,
) -> impl IntoResponse {
    let response = state.service.find_path(&start, &target, query.use_cache);
    Json(response)
}

/// Just the degrees of separation between two users.
#[utoipa::path(
    get,
    path = "/users/{start}/degrees/{target}",
    tag = "paths",
    responses(
        (status = 200, description = "Degrees of separation (−1 when unreachable)", body = Object)
    )
)]
pub async fn degrees_of_separation(
    State(state): State<Arc<AppState>>,
    Path((start, target)): Path<(String, String)>,
) -> impl IntoResponse {
    let degrees = state.service.degrees_of_separation(&start, &target);
    Json(serde_json::json!({
        "start_user_id": start,
        "target_user_id": target,
        "degrees_of_separation": degrees
    }))
}

/// Run several path queries in one request.
///
/// Queries execute sequentially; the result map is keyed
/// `"start:target"`.
#[utoipa::path(
    post,
    path = "/paths/batch",
    tag = "paths",
    request_body = Object,
    responses(
        (status = 200, description = "Map of query key to path result", body = Object)
    )
)]
pub async fn batch_paths(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BatchPathsRequest>,
) -> impl IntoResponse {
    let results = state.service.batch_find_paths(&req.pairs);
    Json(results)
}
