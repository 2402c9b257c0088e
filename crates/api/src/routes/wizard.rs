//! Route definitions for the add-plant wizard.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::wizard;
use crate::state::AppState;

/// Wizard routes mounted at `/wizard`.
///
/// ```text
/// POST   /                -> create_session
/// GET    /{id}            -> get_session
/// DELETE /{id}            -> abandon_session
/// POST   /{id}/actions    -> apply_action
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(wizard::create_session))
        .route(
            "/{id}",
            get(wizard::get_session).delete(wizard::abandon_session),
        )
        .route("/{id}/actions", post(wizard::apply_action))
}
