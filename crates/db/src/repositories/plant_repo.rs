//! Repository for the `plants` table.

use sqlx::PgPool;
use verdant_core::types::DbId;

use crate::models::plant::{CreatePlant, Plant, UpdatePlant};

/// Column list shared across queries. `last_watered_at` is derived
/// from the newest watering-history row on every read.
const COLUMNS: &str = "id, user_id, room_id, name, photo_url, watering_frequency_days, \
     species, care_summary, care_instructions, ai_created, \
     (SELECT MAX(watered_at) FROM watering_events WHERE plant_id = plants.id) AS last_watered_at, \
     created_at, updated_at";

/// Provides CRUD operations for plants, always scoped to the owning
/// user.
pub struct PlantRepo;

impl PlantRepo {
    /// Insert a new plant for a user, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreatePlant,
    ) -> Result<Plant, sqlx::Error> {
        let query = format!(
            "INSERT INTO plants (user_id, room_id, name, photo_url, watering_frequency_days,
                                 species, care_summary, care_instructions, ai_created)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Plant>(&query)
            .bind(user_id)
            .bind(input.room_id)
            .bind(&input.name)
            .bind(&input.photo_url)
            .bind(input.watering_frequency_days)
            .bind(&input.species)
            .bind(&input.care_summary)
            .bind(&input.care_instructions)
            .bind(input.ai_created)
            .fetch_one(pool)
            .await
    }

    /// Find a plant by ID, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Plant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM plants WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Plant>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's plants, most recently created first, optionally
    /// filtered by room.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        room_id: Option<DbId>,
    ) -> Result<Vec<Plant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM plants
             WHERE user_id = $1 AND ($2::BIGINT IS NULL OR room_id = $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Plant>(&query)
            .bind(user_id)
            .bind(room_id)
            .fetch_all(pool)
            .await
    }

    /// Count all plants owned by a user. Feeds the total-plant quota.
    pub async fn count_by_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM plants WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Update a plant. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the plant does not exist or belongs to
    /// another user.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdatePlant,
    ) -> Result<Option<Plant>, sqlx::Error> {
        let query = format!(
            "UPDATE plants SET
                name = COALESCE($3, name),
                room_id = COALESCE($4, room_id),
                photo_url = COALESCE($5, photo_url),
                watering_frequency_days = COALESCE($6, watering_frequency_days),
                species = COALESCE($7, species),
                care_summary = COALESCE($8, care_summary),
                care_instructions = COALESCE($9, care_instructions),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Plant>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(input.room_id)
            .bind(&input.photo_url)
            .bind(input.watering_frequency_days)
            .bind(&input.species)
            .bind(&input.care_summary)
            .bind(&input.care_instructions)
            .fetch_optional(pool)
            .await
    }

    /// Delete a plant. The watering history cascades at the SQL level.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM plants WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
