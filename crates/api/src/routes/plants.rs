//! Route definitions for plants and their watering history.

use axum::routing::get;
use axum::Router;

use crate::handlers::{plants, watering};
use crate::state::AppState;

/// Plant routes mounted at `/plants`.
///
/// ```text
/// GET    /                   -> list_plants
/// POST   /                   -> create_plant
/// GET    /{id}               -> get_plant
/// PUT    /{id}               -> update_plant
/// DELETE /{id}               -> delete_plant
/// GET    /{id}/waterings     -> list_waterings
/// POST   /{id}/waterings     -> record_watering
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(plants::list_plants).post(plants::create_plant))
        .route(
            "/{id}",
            get(plants::get_plant)
                .put(plants::update_plant)
                .delete(plants::delete_plant),
        )
        .route(
            "/{id}/waterings",
            get(watering::list_waterings).post(watering::record_watering),
        )
}
