use std::sync::Arc;

use verdant_ai::{PlantIdentifier, RetryPolicy};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: verdant_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Plant identification/care service (mock or HTTP).
    pub identifier: Arc<dyn PlantIdentifier>,
    /// Backoff policy for AI calls.
    pub retry: RetryPolicy,
}
