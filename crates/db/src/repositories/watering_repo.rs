//! Repository for the append-only `watering_events` table.

use sqlx::PgPool;
use verdant_core::types::{DbId, Timestamp};

use crate::models::watering_event::WateringEvent;

const COLUMNS: &str = "id, plant_id, watered_at, created_at";

/// Provides insert and lookup operations for watering history. There
/// is deliberately no update: history rows are immutable.
pub struct WateringRepo;

impl WateringRepo {
    /// Record a watering for a plant, returning the created row.
    pub async fn create(
        pool: &PgPool,
        plant_id: DbId,
        watered_at: Timestamp,
    ) -> Result<WateringEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO watering_events (plant_id, watered_at)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WateringEvent>(&query)
            .bind(plant_id)
            .bind(watered_at)
            .fetch_one(pool)
            .await
    }

    /// The most recent watering for a plant, if any.
    pub async fn latest_for_plant(
        pool: &PgPool,
        plant_id: DbId,
    ) -> Result<Option<WateringEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM watering_events
             WHERE plant_id = $1
             ORDER BY watered_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, WateringEvent>(&query)
            .bind(plant_id)
            .fetch_optional(pool)
            .await
    }

    /// A plant's watering history, newest first.
    pub async fn list_for_plant(
        pool: &PgPool,
        plant_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WateringEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM watering_events
             WHERE plant_id = $1
             ORDER BY watered_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, WateringEvent>(&query)
            .bind(plant_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
