//! User management handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::types::{CreateUserRequest, CreateUserResponse, ErrorResponse};
use crate::AppState;

/// Create a new user.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = CreateUserResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> impl IntoResponse {
    if req.username.trim().is_empty() || req.email.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "username and email must be non-empty".to_string(),
            }),
        )
            .into_response();
    }

    let user_id = state
        .service
        .add_user(&req.username, &req.email, req.user_id.as_deref());
    (StatusCode::CREATED, Json(CreateUserResponse { user_id })).into_response()
}

/// Fetch a user by id.
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "users",
    responses(
        (status = 200, description = "User record", body = Object),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    match state.service.get_user(&user_id) {
        Some(user) => Json(user).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("user '{user_id}' not found"),
            }),
        )
            .into_response(),
    }
}
