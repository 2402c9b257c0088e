//! Repository for the `users` table.
//!
//! Account lifecycle belongs to the external auth service; the only
//! writes here mirror provisioned accounts (and seed test fixtures).

use sqlx::PgPool;
use verdant_core::types::DbId;

use crate::models::user::User;

const COLUMNS: &str = "id, email, display_name, created_at";

pub struct UserRepo;

impl UserRepo {
    /// Mirror a provisioned account, returning the created row.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        display_name: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, display_name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(display_name)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
