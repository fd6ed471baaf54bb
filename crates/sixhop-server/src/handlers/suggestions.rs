//! Second-degree connection suggestions.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::types::{ErrorResponse, SuggestionResponse, SuggestionsQuery};
use crate::AppState;

/// Suggest connections: friends-of-friends ranked by mutual count.
#[utoipa::path(
    get,
    path = "/users/{user_id}/suggestions",
    tag = "users",
    params(
        ("user_id" = String, Path, description = "User to suggest for"),
        ("limit" = Option<usize>, Query, description = "Maximum suggestions (default 10)")
    ),
    responses(
        (status = 200, description = "Ranked suggestions", body = [SuggestionResponse]),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    )
)]
pub async fn suggest_connections(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<SuggestionsQuery>,
) -> impl IntoResponse {
    if !state.service.has_user(&user_id) {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("user '{user_id}' not found"),
            }),
        )
            .into_response();
    }

    let direct = state.service.connections_of(&user_id);
    let mut mutual_counts: HashMap<String, usize> = HashMap::new();
    for friend in &direct {
        for candidate in state.service.connections_of(friend) {
            if candidate != user_id && !direct.contains(&candidate) {
                *mutual_counts.entry(candidate).or_insert(0) += 1;
            }
        }
    }

    // Rank by mutual count, id as a stable tiebreak.
    let mut ranked: Vec<(String, usize)> = mutual_counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    #[allow(clippy::cast_precision_loss)]
    let suggestions: Vec<SuggestionResponse> = ranked
        .into_iter()
        .take(query.limit)
        .filter_map(|(candidate, mutuals)| {
            state.service.get_user(&candidate).map(|user| {
                let strength = (mutuals as f64 / direct.len().max(1) as f64).min(1.0);
                SuggestionResponse {
                    user_id: candidate,
                    username: user.username().to_string(),
                    mutual_friends_count: mutuals,
                    connection_strength: strength,
                }
            })
        })
        .collect();

    Json(suggestions).into_response()
}
