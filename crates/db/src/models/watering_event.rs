//! Watering history model. Rows are append-only; once created they
//! are never updated.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use verdant_core::types::{DbId, Timestamp};

/// A watering event row from the `watering_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WateringEvent {
    pub id: DbId,
    pub plant_id: DbId,
    pub watered_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for recording a watering. `watered_at` defaults to now when
/// omitted, so backfilling a missed entry is possible.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateWateringEvent {
    pub watered_at: Option<Timestamp>,
}
