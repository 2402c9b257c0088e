pub mod health;
pub mod limits;
pub mod plants;
pub mod rooms;
pub mod wizard;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /plants                         list, create
/// /plants/{id}                    get, update, delete
/// /plants/{id}/waterings          record watering, history
///
/// /rooms                          list, create
/// /rooms/{id}                     rename, delete
///
/// /usage-limits                   both quota checks
///
/// /wizard                         start session
/// /wizard/{id}                    get, abandon
/// /wizard/{id}/actions            apply a step action
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Plants (also nest the watering history).
        .nest("/plants", plants::router())
        // Rooms.
        .nest("/rooms", rooms::router())
        // Usage limits.
        .nest("/usage-limits", limits::router())
        // Add-plant wizard.
        .nest("/wizard", wizard::router())
}
