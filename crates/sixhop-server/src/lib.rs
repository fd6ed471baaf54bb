//! sixhop server: REST API library for the sixhop pathfinding engine.
//!
//! Thin HTTP wrappers over [`sixhop_core::PathService`]: every domain
//! outcome (unknown user, unreachable target, duplicate edge) is a
//! regular 200 response, malformed requests are rejected by the
//! extractors, and only internal faults surface as 5xx.
//!
//! The OpenAPI document is served at `GET /api-docs/openapi.json`.

use axum::{
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

use sixhop_core::PathService;

mod handlers;
mod types;

pub use types::*;

pub use handlers::{
    add_connection, batch_paths, create_user, degrees_of_separation, find_path, get_user,
    health_check, remove_connection, service_stats, suggest_connections,
};

/// sixhop API documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "sixhop API",
        description = "Social-graph pathfinding: shortest connection paths \
            (at most six degrees of separation) over a sharded in-memory \
            friendship graph with a TTL-bounded result cache.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "monitoring", description = "Health and statistics"),
        (name = "users", description = "User management and suggestions"),
        (name = "connections", description = "Friendship mutations"),
        (name = "paths", description = "Shortest-path queries")
    ),
    paths(
        handlers::health::health_check,
        handlers::stats::service_stats,
        handlers::users::create_user,
        handlers::users::get_user,
        handlers::suggestions::suggest_connections,
        handlers::connections::add_connection,
        handlers::connections::remove_connection,
        handlers::paths::find_path,
        handlers::paths::degrees_of_separation,
        handlers::paths::batch_paths
    ),
    components(
        schemas(
            CreateUserRequest,
            CreateUserResponse,
            ConnectionRequest,
            ConnectionResponse,
            SuggestionResponse,
            ErrorResponse
        )
    )
)]
pub struct ApiDoc;

/// Application state shared across handlers.
pub struct AppState {
    /// The pathfinding service instance.
    pub service: PathService,
}

/// Serves the OpenAPI document.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Builds the API router over the given state.
#[must_use]
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/stats", get(service_stats))
        .route("/users", post(create_user))
        .route("/users/{user_id}", get(get_user))
        .route("/users/{user_id}/suggestions", get(suggest_connections))
        .route("/users/{start}/degrees/{target}", get(degrees_of_separation))
        .route("/paths/{start}/{target}", get(find_path))
        .route("/paths/batch", post(batch_paths))
        .route(
            "/connections",
            post(add_connection).delete(remove_connection),
        )
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(state)
}
