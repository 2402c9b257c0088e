//! Route definitions for usage limits.

use axum::routing::get;
use axum::Router;

use crate::handlers::limits;
use crate::state::AppState;

/// Usage-limit routes mounted at `/usage-limits`.
///
/// ```text
/// GET /    -> get_usage_limits
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(limits::get_usage_limits))
}
