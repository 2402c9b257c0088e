//! Repository for the monthly AI usage counters.

use sqlx::PgPool;
use verdant_core::types::DbId;

use crate::models::ai_usage::AiUsage;

const COLUMNS: &str = "user_id, month, generation_count, updated_at";

/// Point lookup and atomic increment of the per-(user, month) counter.
pub struct AiUsageRepo;

impl AiUsageRepo {
    /// Find the counter row for a user and month. `None` means no AI
    /// generations have been used in that month.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        month: &str,
    ) -> Result<Option<AiUsage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ai_usage WHERE user_id = $1 AND month = $2");
        sqlx::query_as::<_, AiUsage>(&query)
            .bind(user_id)
            .bind(month)
            .fetch_optional(pool)
            .await
    }

    /// Increment the counter for a user and month by one, creating the
    /// row on first use.
    ///
    /// A single upsert statement so concurrent increments cannot lose
    /// updates. Returns the row after the increment.
    pub async fn increment(
        pool: &PgPool,
        user_id: DbId,
        month: &str,
    ) -> Result<AiUsage, sqlx::Error> {
        let query = format!(
            "INSERT INTO ai_usage (user_id, month, generation_count)
             VALUES ($1, $2, 1)
             ON CONFLICT (user_id, month)
             DO UPDATE SET generation_count = ai_usage.generation_count + 1,
                           updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AiUsage>(&query)
            .bind(user_id)
            .bind(month)
            .fetch_one(pool)
            .await
    }
}
