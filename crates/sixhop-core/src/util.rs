//! Small shared helpers.

use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the Unix epoch as a float, the wire timestamp format.
#[must_use]
pub fn epoch_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}
