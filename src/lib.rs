//! EduLearn: a deliberately vulnerable course-platform REST backend for security training.
//! Do not expose it to untrusted networks.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod password;
pub mod response;
pub mod routes;
pub mod sandbox;
pub mod seed;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;

pub use error::{AppError, ConfigError};
pub use routes::{api_routes, app, common_routes};
pub use sandbox::{Flag, QueryOutcome, SandboxStore};
pub use seed::{prepare_primary, seed_demo_data, sync_sandbox, SyncReport};
pub use settings::Settings;
pub use state::AppState;
pub use store::{connect, ensure_tables};
