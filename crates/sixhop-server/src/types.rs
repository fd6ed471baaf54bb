//! Request and response types for the REST API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for creating a user.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// Display name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Optional caller-supplied id; minted when absent.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Response body for a created user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateUserResponse {
    /// The effective user id.
    pub user_id: String,
}

/// Request body for adding or removing a connection.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ConnectionRequest {
    /// One endpoint.
    pub from_user_id: String,
    /// The other endpoint.
    pub to_user_id: String,
}

/// Outcome of a connection mutation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConnectionResponse {
    /// Whether the graph changed.
    pub success: bool,
    /// Echoed endpoint.
    pub from_user_id: String,
    /// Echoed endpoint.
    pub to_user_id: String,
}

/// Request body for batch pathfinding.
#[derive(Debug, Deserialize)]
pub struct BatchPathsRequest {
    /// `(start, target)` pairs, each queried sequentially.
    pub pairs: Vec<(String, String)>,
}

/// A suggested second-degree connection.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuggestionResponse {
    /// The suggested user.
    pub user_id: String,
    /// Their display name.
    pub username: String,
    /// Mutual friends with the requesting user.
    pub mutual_friends_count: usize,
    /// `min(mutual_friends / degree, 1.0)`.
    pub connection_strength: f64,
}

/// Generic error body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable description.
    pub error: String,
}

/// Query parameters for a path lookup.
#[derive(Debug, Deserialize)]
pub struct PathQuery {
    /// Consult the result cache (default true).
    #[serde(default = "default_true")]
    pub use_cache: bool,
}

/// Query parameters for connection suggestions.
#[derive(Debug, Deserialize)]
pub struct SuggestionsQuery {
    /// Maximum number of suggestions (default 10).
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_true() -> bool {
    true
}

fn default_limit() -> usize {
    10
}
