//! Error types for the sixhop engine.
//!
//! Domain outcomes (unknown user, duplicate edge, unreachable target)
//! are not errors here: they travel as ordinary return values such as
//! `bool` or `found = false`. This module covers the failures that
//! remain: configuration and snapshot serialization. Invariant
//! violations are fatal to the process and never surface as values.

use thiserror::Error;

/// Result type alias for sixhop operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sixhop operations.
///
/// Each variant carries a stable code following the pattern `HOP-XXX`
/// for easy debugging and log correlation.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (HOP-001).
    #[error("[HOP-001] Configuration error: {0}")]
    Config(String),

    /// Snapshot serialization error (HOP-002).
    #[error("[HOP-002] Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Returns the error code (e.g., "HOP-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "HOP-001",
            Self::Serialization(_) => "HOP-002",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
