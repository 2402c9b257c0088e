//! Handlers for plant CRUD.
//!
//! Every response embeds the derived watering schedule, recomputed
//! from the newest watering-history row on each read; it is never
//! stored. All endpoints require authentication and are scoped to the
//! calling user.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use verdant_core::error::CoreError;
use verdant_core::types::DbId;
use verdant_core::watering::{self, WateringStatus};
use verdant_core::{limits, validation};
use verdant_db::models::plant::{CreatePlant, Plant, UpdatePlant};
use verdant_db::repositories::{PlantRepo, RoomRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::limits::check_plant_limit;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// A plant row plus its derived watering schedule.
#[derive(Debug, Serialize)]
pub struct PlantWithStatus {
    #[serde(flatten)]
    pub plant: Plant,
    #[serde(flatten)]
    pub status: WateringStatus,
    /// Human-readable schedule label, e.g. "3 days overdue".
    pub status_label: String,
}

/// Attach the derived schedule to a plant row.
pub fn present(plant: Plant) -> PlantWithStatus {
    let status = watering::watering_status(
        plant.watering_frequency_days,
        plant.last_watered_at,
        chrono::Utc::now(),
    );
    let status_label = watering::status_label(status.days_until_watering);
    PlantWithStatus {
        plant,
        status,
        status_label,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a create payload, returning it with the name trimmed.
fn validate_create(input: CreatePlant) -> Result<CreatePlant, CoreError> {
    let name = validation::validate_plant_name(&input.name)?;
    validation::validate_frequency(input.watering_frequency_days)?;
    if let Some(url) = &input.photo_url {
        validation::validate_photo_url(url)?;
    }
    for text in [&input.care_summary, &input.care_instructions].into_iter().flatten() {
        validation::validate_care_text(text)?;
    }
    Ok(CreatePlant { name, ..input })
}

/// Validate the provided fields of an update payload.
fn validate_update(input: UpdatePlant) -> Result<UpdatePlant, CoreError> {
    let name = match &input.name {
        Some(name) => Some(validation::validate_plant_name(name)?),
        None => None,
    };
    if let Some(days) = input.watering_frequency_days {
        validation::validate_frequency(days)?;
    }
    if let Some(url) = &input.photo_url {
        validation::validate_photo_url(url)?;
    }
    for text in [&input.care_summary, &input.care_instructions].into_iter().flatten() {
        validation::validate_care_text(text)?;
    }
    Ok(UpdatePlant { name, ..input })
}

/// Ensure a referenced room exists and belongs to the user.
pub(crate) async fn ensure_room_owned(
    state: &AppState,
    user_id: DbId,
    room_id: DbId,
) -> AppResult<()> {
    RoomRepo::find_by_id(&state.pool, user_id, room_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Room",
            id: room_id,
        }))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Query parameters for listing plants.
#[derive(Debug, Deserialize)]
pub struct ListPlantsParams {
    /// Restrict the listing to one room.
    pub room_id: Option<DbId>,
}

/// GET /api/v1/plants
///
/// List the caller's plants with their derived watering schedules,
/// most recently created first.
pub async fn list_plants(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListPlantsParams>,
) -> AppResult<impl IntoResponse> {
    let plants = PlantRepo::list_by_user(&state.pool, auth.user_id, params.room_id).await?;
    let data: Vec<PlantWithStatus> = plants.into_iter().map(present).collect();

    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/plants
///
/// Create a plant. Enforces the total-plant quota (fail-open on
/// counter read errors) and input validation.
pub async fn create_plant(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePlant>,
) -> AppResult<impl IntoResponse> {
    let input = validate_create(input)?;

    let quota = check_plant_limit(&state.pool, auth.user_id).await;
    if !quota.allowed {
        return Err(plant_limit_conflict(quota));
    }

    if let Some(room_id) = input.room_id {
        ensure_room_owned(&state, auth.user_id, room_id).await?;
    }

    let plant = PlantRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(plant_id = plant.id, user_id = auth.user_id, "Plant created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: present(plant),
        }),
    ))
}

/// GET /api/v1/plants/{id}
pub async fn get_plant(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(plant_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let plant = PlantRepo::find_by_id(&state.pool, auth.user_id, plant_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Plant",
            id: plant_id,
        }))?;

    Ok(Json(DataResponse {
        data: present(plant),
    }))
}

/// PUT /api/v1/plants/{id}
///
/// Update a plant. Only provided fields are applied.
pub async fn update_plant(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(plant_id): Path<DbId>,
    Json(input): Json<UpdatePlant>,
) -> AppResult<impl IntoResponse> {
    let input = validate_update(input)?;

    if let Some(room_id) = input.room_id {
        ensure_room_owned(&state, auth.user_id, room_id).await?;
    }

    let plant = PlantRepo::update(&state.pool, auth.user_id, plant_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Plant",
            id: plant_id,
        }))?;

    tracing::info!(plant_id, user_id = auth.user_id, "Plant updated");

    Ok(Json(DataResponse {
        data: present(plant),
    }))
}

/// DELETE /api/v1/plants/{id}
///
/// Delete a plant; its watering history cascades.
pub async fn delete_plant(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(plant_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = PlantRepo::delete(&state.pool, auth.user_id, plant_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Plant",
            id: plant_id,
        }));
    }

    tracing::info!(plant_id, user_id = auth.user_id, "Plant deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// The quota-exceeded error for plant creation; shared with the
/// wizard's confirm step.
pub(crate) fn plant_limit_conflict(quota: limits::LimitStatus) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Plant limit reached ({} of {}). Remove a plant before adding another",
        quota.used, quota.limit
    )))
}
