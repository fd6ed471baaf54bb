//! User model for the social graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A member of the social network.
///
/// The id is opaque to the engine: typically a v4 UUID minted by
/// [`crate::graph::SocialGraph::add_user`], but any colon-free string
/// supplied by the caller is accepted and treated as bytes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    user_id: String,
    username: String,
    email: String,
    created_at: DateTime<Utc>,
    is_active: bool,
}

impl User {
    /// Creates a new active user with `created_at = now`.
    #[must_use]
    pub fn new(user_id: &str, username: &str, email: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
            is_active: true,
        }
    }

    /// Returns the user id.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether the user is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }
}
