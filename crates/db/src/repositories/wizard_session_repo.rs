//! Repository for add-plant wizard sessions.

use sqlx::PgPool;
use verdant_core::types::DbId;

use crate::models::wizard_session::WizardSession;

const COLUMNS: &str = "id, user_id, status, state, created_at, updated_at";

/// Create/lookup/advance operations for wizard sessions, scoped to the
/// owning user.
pub struct WizardSessionRepo;

impl WizardSessionRepo {
    /// Start a new session in the given initial state.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        state: &serde_json::Value,
    ) -> Result<WizardSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO wizard_sessions (user_id, state)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WizardSession>(&query)
            .bind(user_id)
            .bind(state)
            .fetch_one(pool)
            .await
    }

    /// Find a session by ID, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<WizardSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM wizard_sessions WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, WizardSession>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Persist a new state (and optionally a new status) for a
    /// session. Returns `None` if the session does not exist or
    /// belongs to another user.
    pub async fn update_state(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        state: &serde_json::Value,
        status: &str,
    ) -> Result<Option<WizardSession>, sqlx::Error> {
        let query = format!(
            "UPDATE wizard_sessions
             SET state = $3, status = $4, updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WizardSession>(&query)
            .bind(id)
            .bind(user_id)
            .bind(state)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Mark a session abandoned. Returns `true` if an in-progress row
    /// was updated.
    pub async fn abandon(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE wizard_sessions
             SET status = 'abandoned', updated_at = NOW()
             WHERE id = $1 AND user_id = $2 AND status = 'in_progress'",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
