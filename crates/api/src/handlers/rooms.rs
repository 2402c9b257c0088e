//! Handlers for room CRUD. Rooms are a grouping label on plants;
//! deleting one leaves its plants unassigned rather than deleting
//! them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use verdant_core::error::CoreError;
use verdant_core::types::DbId;
use verdant_core::validation;
use verdant_db::models::room::{CreateRoom, UpdateRoom};
use verdant_db::repositories::RoomRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/rooms
pub async fn list_rooms(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rooms = RoomRepo::list_by_user(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse { data: rooms }))
}

/// POST /api/v1/rooms
pub async fn create_room(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateRoom>,
) -> AppResult<impl IntoResponse> {
    let name = validation::validate_room_name(&input.name)?;

    let room = RoomRepo::create(&state.pool, auth.user_id, &name).await?;
    tracing::info!(room_id = room.id, user_id = auth.user_id, "Room created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: room })))
}

/// PUT /api/v1/rooms/{id}
pub async fn update_room(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(room_id): Path<DbId>,
    Json(input): Json<UpdateRoom>,
) -> AppResult<impl IntoResponse> {
    let name = validation::validate_room_name(&input.name)?;

    let room = RoomRepo::update(&state.pool, auth.user_id, room_id, &name)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Room",
            id: room_id,
        }))?;

    tracing::info!(room_id, user_id = auth.user_id, "Room renamed");

    Ok(Json(DataResponse { data: room }))
}

/// DELETE /api/v1/rooms/{id}
///
/// Delete a room. Plants in it keep existing with no room assigned.
pub async fn delete_room(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(room_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = RoomRepo::delete(&state.pool, auth.user_id, room_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Room",
            id: room_id,
        }));
    }

    tracing::info!(room_id, user_id = auth.user_id, "Room deleted");

    Ok(StatusCode::NO_CONTENT)
}
