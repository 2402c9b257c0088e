//! Plant entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use verdant_core::types::{DbId, Timestamp};

/// A plant row from the `plants` table, joined with the timestamp of
/// its most recent watering (`NULL` when never watered).
///
/// The watering schedule itself is derived from `last_watered_at` and
/// `watering_frequency_days` at the API layer on every read; it is
/// never stored.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Plant {
    pub id: DbId,
    pub user_id: DbId,
    pub room_id: Option<DbId>,
    pub name: String,
    pub photo_url: Option<String>,
    pub watering_frequency_days: i32,
    pub species: Option<String>,
    pub care_summary: Option<String>,
    pub care_instructions: Option<String>,
    pub ai_created: bool,
    pub last_watered_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new plant.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlant {
    pub name: String,
    pub room_id: Option<DbId>,
    pub photo_url: Option<String>,
    pub watering_frequency_days: i32,
    pub species: Option<String>,
    pub care_summary: Option<String>,
    pub care_instructions: Option<String>,
    /// Set by the wizard, not by clients; defaults to false.
    #[serde(skip_deserializing, default)]
    pub ai_created: bool,
}

/// DTO for updating an existing plant. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePlant {
    pub name: Option<String>,
    pub room_id: Option<DbId>,
    pub photo_url: Option<String>,
    pub watering_frequency_days: Option<i32>,
    pub species: Option<String>,
    pub care_summary: Option<String>,
    pub care_instructions: Option<String>,
}
