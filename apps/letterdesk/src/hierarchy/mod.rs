// Per-user hierarchy persistence.
// One JSON document per authenticated user, keyed by the backend's user id.

pub mod auth;
pub mod handlers;
pub mod service;
pub mod store;

use thiserror::Error;

pub use auth::{AuthError, BackendAuthClient, SessionResolver, StaticSessionResolver};
pub use service::HierarchyService;
pub use store::{HierarchyStore, MemoryHierarchyStore, PgHierarchyStore};

#[derive(Debug, Error)]
pub enum HierarchyError {
    #[error("no signed-in user")]
    Unauthorized,

    #[error("session lookup failed: {0}")]
    Auth(#[from] AuthError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored hierarchy is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}
