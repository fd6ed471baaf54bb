//! HTTP handlers, grouped by resource.

pub mod connections;
pub mod health;
pub mod paths;
pub mod stats;
pub mod suggestions;
pub mod users;

pub use connections::{add_connection, remove_connection};
pub use health::health_check;
pub use paths::{batch_paths, degrees_of_separation, find_path};
pub use stats::service_stats;
pub use suggestions::suggest_connections;
pub use users::{create_user, get_user};
