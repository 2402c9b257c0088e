//! Room entity model and DTOs. Rooms are a grouping label on plants.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use verdant_core::types::{DbId, Timestamp};

/// A room row from the `rooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Room {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new room.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoom {
    pub name: String,
}

/// DTO for renaming a room.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRoom {
    pub name: String,
}
