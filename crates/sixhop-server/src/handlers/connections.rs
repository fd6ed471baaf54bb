//! Connection mutation handlers.

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::types::{ConnectionRequest, ConnectionResponse};
use crate::AppState;

/// Add a friendship connection.
///
/// `success: false` covers self-loops, unknown endpoints, and
/// duplicate edges; none of those are transport errors.
#[utoipa::path(
    post,
    path = "/connections",
    tag = "connections",
    request_body = ConnectionRequest,
    responses(
        (status = 200, description = "Mutation outcome", body = ConnectionResponse)
    )
)]
pub async fn add_connection(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConnectionRequest>,
) -> impl IntoResponse {
    let success = state
        .service
        .add_connection(&req.from_user_id, &req.to_user_id);
    Json(ConnectionResponse {
        success,
        from_user_id: req.from_user_id,
        to_user_id: req.to_user_id,
    })
}

/// Remove a friendship connection.
#[utoipa::path(
    delete,
    path = "/connections",
    tag = "connections",
    request_body = ConnectionRequest,
    responses(
        (status = 200, description = "Mutation outcome", body = ConnectionResponse)
    )
)]
pub async fn remove_connection(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConnectionRequest>,
) -> impl IntoResponse {
    let success = state
        .service
        .remove_connection(&req.from_user_id, &req.to_user_id);
    Json(ConnectionResponse {
        success,
        from_user_id: req.from_user_id,
        to_user_id: req.to_user_id,
    })
}
