//! Handlers and policy for the per-user usage limits.
//!
//! The quota arithmetic is pure (`verdant_core::limits`); this module
//! owns the read side and, deliberately, the fail-open policy: when
//! the counter store cannot be read, the user is allowed through with
//! a warning rather than blocked by infrastructure trouble. Write
//! errors (incrementing the counter) are never swallowed.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;
use verdant_core::limits::{self, LimitStatus};
use verdant_core::types::DbId;
use verdant_db::repositories::{AiUsageRepo, PlantRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Checks (fail-open on read errors)
// ---------------------------------------------------------------------------

/// The monthly AI generation quota plus its reset date.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AiGenerationStatus {
    #[serde(flatten)]
    pub status: LimitStatus,
    /// First day of the next calendar month.
    pub resets_on: NaiveDate,
}

/// Evaluate the caller's monthly AI generation quota.
///
/// A missing counter row means zero used. A read error fails open:
/// the user is allowed through and the error is logged.
pub async fn check_ai_generation_limit(pool: &PgPool, user_id: DbId) -> AiGenerationStatus {
    let now = chrono::Utc::now();
    let month = limits::month_key(now);

    let status = match AiUsageRepo::find(pool, user_id, &month).await {
        Ok(row) => {
            let used = row.map_or(0, |r| r.generation_count);
            LimitStatus::evaluate(used, limits::AI_GENERATIONS_PER_MONTH)
        }
        Err(err) => {
            tracing::warn!(user_id, error = %err, "AI usage read failed; allowing through");
            LimitStatus::open(limits::AI_GENERATIONS_PER_MONTH)
        }
    };

    AiGenerationStatus {
        status,
        resets_on: limits::resets_on(now),
    }
}

/// Evaluate the caller's total-plant quota, failing open on read
/// errors identically to the AI check.
pub async fn check_plant_limit(pool: &PgPool, user_id: DbId) -> LimitStatus {
    match PlantRepo::count_by_user(pool, user_id).await {
        Ok(count) => LimitStatus::evaluate(count, limits::MAX_PLANTS_PER_USER),
        Err(err) => {
            tracing::warn!(user_id, error = %err, "Plant count read failed; allowing through");
            LimitStatus::open(limits::MAX_PLANTS_PER_USER)
        }
    }
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// Both quotas in one payload.
#[derive(Debug, Serialize)]
pub struct UsageLimits {
    pub ai_generations: AiGenerationStatus,
    pub plants: LimitStatus,
}

/// GET /api/v1/usage-limits
///
/// Both quota checks for the caller. The two reads touch disjoint
/// data, so they run concurrently.
pub async fn get_usage_limits(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let (ai_generations, plants) = tokio::join!(
        check_ai_generation_limit(&state.pool, auth.user_id),
        check_plant_limit(&state.pool, auth.user_id),
    );

    Ok(Json(DataResponse {
        data: UsageLimits {
            ai_generations,
            plants,
        },
    }))
}
