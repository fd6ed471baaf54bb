//! Statistics handler.

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::AppState;

/// Merged service, graph, and cache statistics.
#[utoipa::path(
    get,
    path = "/stats",
    tag = "monitoring",
    responses(
        (status = 200, description = "Service statistics", body = Object)
    )
)]
pub async fn service_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.service.stats())
}
