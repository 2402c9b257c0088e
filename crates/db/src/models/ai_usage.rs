//! Monthly AI usage counter model.

use serde::Serialize;
use sqlx::FromRow;
use verdant_core::types::{DbId, Timestamp};

/// A counter row from the `ai_usage` table: one per (user, month).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AiUsage {
    pub user_id: DbId,
    /// Quota window key, e.g. `"2025-06"`.
    pub month: String,
    pub generation_count: i64,
    pub updated_at: Timestamp,
}
