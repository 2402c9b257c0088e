//! Repository for the `rooms` table.

use sqlx::PgPool;
use verdant_core::types::DbId;

use crate::models::room::Room;

const COLUMNS: &str = "id, user_id, name, created_at";

/// Provides CRUD operations for rooms, scoped to the owning user.
pub struct RoomRepo;

impl RoomRepo {
    /// Insert a new room, returning the created row.
    pub async fn create(pool: &PgPool, user_id: DbId, name: &str) -> Result<Room, sqlx::Error> {
        let query = format!(
            "INSERT INTO rooms (user_id, name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(user_id)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find a room by ID, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's rooms in name order.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE user_id = $1 ORDER BY name");
        sqlx::query_as::<_, Room>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Rename a room. Returns `None` if the room does not exist or
    /// belongs to another user.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        name: &str,
    ) -> Result<Option<Room>, sqlx::Error> {
        let query = format!(
            "UPDATE rooms SET name = $3 WHERE id = $1 AND user_id = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .bind(user_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a room. Plants in the room keep existing with a `NULL`
    /// room (SQL `ON DELETE SET NULL`). Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
