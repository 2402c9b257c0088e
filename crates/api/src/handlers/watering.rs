//! Handlers for the watering history of a plant.
//!
//! History rows are append-only: recording a watering inserts a row,
//! and the plant's schedule is derived from the newest one. Nothing
//! here ever updates a history row.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use verdant_core::error::CoreError;
use verdant_core::types::DbId;
use verdant_db::models::watering_event::CreateWateringEvent;
use verdant_db::repositories::{PlantRepo, WateringRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Ensure the plant exists and belongs to the caller.
async fn ensure_plant_owned(state: &AppState, user_id: DbId, plant_id: DbId) -> AppResult<()> {
    PlantRepo::find_by_id(&state.pool, user_id, plant_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Plant",
            id: plant_id,
        }))?;
    Ok(())
}

/// POST /api/v1/plants/{id}/waterings
///
/// Record a watering. `watered_at` defaults to now; passing an
/// explicit timestamp backfills a missed entry.
pub async fn record_watering(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(plant_id): Path<DbId>,
    Json(input): Json<CreateWateringEvent>,
) -> AppResult<impl IntoResponse> {
    ensure_plant_owned(&state, auth.user_id, plant_id).await?;

    let watered_at = input.watered_at.unwrap_or_else(chrono::Utc::now);
    let event = WateringRepo::create(&state.pool, plant_id, watered_at).await?;

    tracing::info!(plant_id, user_id = auth.user_id, "Watering recorded");

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// GET /api/v1/plants/{id}/waterings
///
/// A plant's watering history, newest first.
pub async fn list_waterings(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(plant_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    ensure_plant_owned(&state, auth.user_id, plant_id).await?;

    let events = WateringRepo::list_for_plant(
        &state.pool,
        plant_id,
        params.clamp_limit(),
        params.clamp_offset(),
    )
    .await?;

    Ok(Json(DataResponse { data: events }))
}
