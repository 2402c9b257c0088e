//! Handlers for the add-plant wizard.
//!
//! A session persists the step machine from `verdant_core::wizard`
//! between requests. Client actions arrive at one endpoint; the
//! `Identifying` and `GeneratingCare` steps additionally call the AI
//! provider (wrapped in the retry policy) and feed the outcome back
//! into the machine before the response is produced.
//!
//! Quota rules: the monthly AI quota is checked before identification
//! starts and incremented only when the AI-created plant is actually
//! confirmed; increment failures propagate instead of failing open.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use verdant_ai::{retry, AiError};
use verdant_core::error::CoreError;
use verdant_core::types::DbId;
use verdant_core::wizard::{WizardEvent, WizardState, WizardStatus};
use verdant_core::{limits, validation};
use verdant_db::models::plant::CreatePlant;
use verdant_db::models::wizard_session::WizardSession;
use verdant_db::repositories::{AiUsageRepo, PlantRepo, WizardSessionRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::limits::{check_ai_generation_limit, check_plant_limit};
use crate::handlers::plants::{ensure_room_owned, plant_limit_conflict, present, PlantWithStatus};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// A client action posted to a wizard session.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WizardAction {
    /// Start identification from an uploaded photo.
    UploadPhoto { photo_url: String },
    /// Skip the photo and name the plant manually.
    SkipPhoto,
    /// Accept the identification result.
    AcceptIdentification,
    /// Reject the identification result and name the plant manually.
    RejectIdentification,
    /// Provide a name in the manual-name step.
    EnterName { name: String },
    /// Re-run care generation after a failed attempt.
    GenerateCare,
    /// Create the plant from the previewed draft, with optional
    /// adjustments.
    Confirm {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        watering_frequency_days: Option<i32>,
        #[serde(default)]
        room_id: Option<DbId>,
    },
}

/// A wizard session as returned to clients.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: DbId,
    pub status: String,
    pub state: WizardState,
    /// Present once the confirm step has created the plant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plant: Option<PlantWithStatus>,
}

fn view(session: WizardSession, state: WizardState, plant: Option<PlantWithStatus>) -> SessionView {
    SessionView {
        id: session.id,
        status: session.status,
        state,
        plant,
    }
}

// ---------------------------------------------------------------------------
// Session plumbing
// ---------------------------------------------------------------------------

fn decode_state(session: &WizardSession) -> AppResult<WizardState> {
    serde_json::from_value(session.state.clone()).map_err(|e| {
        AppError::InternalError(format!(
            "Corrupt wizard state for session {}: {e}",
            session.id
        ))
    })
}

async fn load_in_progress(
    state: &AppState,
    user_id: DbId,
    session_id: DbId,
) -> AppResult<(WizardSession, WizardState)> {
    let session = WizardSessionRepo::find_by_id(&state.pool, user_id, session_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Wizard session",
            id: session_id,
        }))?;

    if session.status != WizardStatus::InProgress.as_str() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Wizard session is {}",
            session.status
        ))));
    }

    let wizard = decode_state(&session)?;
    Ok((session, wizard))
}

async fn persist(
    state: &AppState,
    user_id: DbId,
    session_id: DbId,
    wizard: &WizardState,
    status: WizardStatus,
) -> AppResult<WizardSession> {
    let json = serde_json::to_value(wizard)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize wizard state: {e}")))?;

    WizardSessionRepo::update_state(&state.pool, user_id, session_id, &json, status.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Wizard session",
            id: session_id,
        }))
}

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

/// POST /api/v1/wizard
///
/// Start a new add-plant wizard session at the photo-upload step.
pub async fn create_session(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let initial = WizardState::initial();
    let json = serde_json::to_value(&initial)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize wizard state: {e}")))?;

    let session = WizardSessionRepo::create(&state.pool, auth.user_id, &json).await?;
    tracing::info!(session_id = session.id, user_id = auth.user_id, "Wizard session started");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: view(session, initial, None),
        }),
    ))
}

/// GET /api/v1/wizard/{id}
pub async fn get_session(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = WizardSessionRepo::find_by_id(&state.pool, auth.user_id, session_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Wizard session",
            id: session_id,
        }))?;

    let wizard = decode_state(&session)?;

    Ok(Json(DataResponse {
        data: view(session, wizard, None),
    }))
}

/// DELETE /api/v1/wizard/{id}
///
/// Abandon an in-progress session.
pub async fn abandon_session(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let abandoned = WizardSessionRepo::abandon(&state.pool, auth.user_id, session_id).await?;

    if !abandoned {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Wizard session",
            id: session_id,
        }));
    }

    tracing::info!(session_id, user_id = auth.user_id, "Wizard session abandoned");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// POST /api/v1/wizard/{id}/actions
///
/// Apply a client action to the session's step machine. Illegal
/// actions for the current step are rejected with a conflict and the
/// session is left unchanged.
pub async fn apply_action(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
    Json(action): Json<WizardAction>,
) -> AppResult<impl IntoResponse> {
    let (_, wizard) = load_in_progress(&state, auth.user_id, session_id).await?;

    let data = match action {
        WizardAction::UploadPhoto { photo_url } => {
            run_identification(&state, auth.user_id, session_id, wizard, photo_url).await?
        }
        WizardAction::SkipPhoto => {
            let next = wizard.apply(WizardEvent::PhotoSkipped)?;
            let session = persist(&state, auth.user_id, session_id, &next, WizardStatus::InProgress)
                .await?;
            view(session, next, None)
        }
        WizardAction::AcceptIdentification => {
            let next = wizard.apply(WizardEvent::ResultAccepted)?;
            run_care_generation(&state, auth.user_id, session_id, next).await?
        }
        WizardAction::RejectIdentification => {
            let next = wizard.apply(WizardEvent::ResultRejected)?;
            let session = persist(&state, auth.user_id, session_id, &next, WizardStatus::InProgress)
                .await?;
            view(session, next, None)
        }
        WizardAction::EnterName { name } => {
            let name = validation::validate_plant_name(&name)?;
            let next = wizard.apply(WizardEvent::NameEntered { name })?;
            run_care_generation(&state, auth.user_id, session_id, next).await?
        }
        WizardAction::GenerateCare => {
            run_care_generation(&state, auth.user_id, session_id, wizard).await?
        }
        WizardAction::Confirm {
            name,
            watering_frequency_days,
            room_id,
        } => {
            confirm_draft(
                &state,
                auth.user_id,
                session_id,
                wizard,
                name,
                watering_frequency_days,
                room_id,
            )
            .await?
        }
    };

    Ok(Json(DataResponse { data }))
}

/// Drive the `Identifying` step: enforce the AI quota, call the
/// identification service, and route to the result or the manual-name
/// fallback.
async fn run_identification(
    state: &AppState,
    user_id: DbId,
    session_id: DbId,
    wizard: WizardState,
    photo_url: String,
) -> AppResult<SessionView> {
    validation::validate_photo_url(&photo_url)?;

    let quota = check_ai_generation_limit(&state.pool, user_id).await;
    if !quota.status.allowed {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Monthly AI limit reached ({} of {}). Resets on {}",
            quota.status.used, quota.status.limit, quota.resets_on
        ))));
    }

    let wizard = wizard.apply(WizardEvent::PhotoUploaded {
        photo_url: photo_url.clone(),
    })?;
    // Persist the in-flight step first so a crashed call leaves a
    // resumable session rather than a phantom one.
    persist(state, user_id, session_id, &wizard, WizardStatus::InProgress).await?;

    let cancel = CancellationToken::new();
    let result = retry::with_retry(&state.retry, &cancel, || {
        state.identifier.identify(&photo_url, &cancel)
    })
    .await;

    let next = match result {
        Ok(identification) if identification.is_confident() => {
            tracing::info!(
                session_id,
                user_id,
                confidence = identification.confidence,
                "Plant identified"
            );
            wizard.apply(WizardEvent::IdentificationSucceeded { identification })?
        }
        Ok(identification) => {
            tracing::info!(
                session_id,
                user_id,
                confidence = identification.confidence,
                "Identification below confidence threshold; manual naming"
            );
            wizard.apply(WizardEvent::IdentificationFailed)?
        }
        Err(err @ AiError::InvalidFile(_)) => {
            // The photo itself is unusable: roll the step back and let
            // the client upload a different file.
            let back = WizardState::initial();
            persist(state, user_id, session_id, &back, WizardStatus::InProgress).await?;
            return Err(AppError::Ai(err));
        }
        Err(err) => {
            tracing::warn!(session_id, user_id, error = %err, "Identification failed; manual naming");
            wizard.apply(WizardEvent::IdentificationFailed)?
        }
    };

    let session = persist(state, user_id, session_id, &next, WizardStatus::InProgress).await?;
    Ok(view(session, next, None))
}

/// Drive the `GeneratingCare` step: call the care-generation service
/// and advance to the preview. On failure the step is left as-is so
/// the client can retry with `generate_care`.
async fn run_care_generation(
    state: &AppState,
    user_id: DbId,
    session_id: DbId,
    wizard: WizardState,
) -> AppResult<SessionView> {
    let (name, scientific_name) = match &wizard {
        WizardState::GeneratingCare {
            name,
            scientific_name,
            ..
        } => (name.clone(), scientific_name.clone()),
        other => {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Care generation is not valid in step '{}'",
                other.step_name()
            ))))
        }
    };

    // Persist the in-flight step before calling out.
    persist(state, user_id, session_id, &wizard, WizardStatus::InProgress).await?;

    let cancel = CancellationToken::new();
    let result = retry::with_retry(&state.retry, &cancel, || {
        state
            .identifier
            .generate_care(&name, scientific_name.as_deref(), &cancel)
    })
    .await;

    match result {
        Ok(care) => {
            let next = wizard.apply(WizardEvent::CareGenerated { care })?;
            let session =
                persist(state, user_id, session_id, &next, WizardStatus::InProgress).await?;
            Ok(view(session, next, None))
        }
        Err(err) => {
            tracing::warn!(session_id, user_id, error = %err, "Care generation failed");
            Err(AppError::Ai(err))
        }
    }
}

/// Drive the confirm step: create the plant from the draft (with
/// optional adjustments), count the AI generation, and complete the
/// session.
async fn confirm_draft(
    state: &AppState,
    user_id: DbId,
    session_id: DbId,
    wizard: WizardState,
    name_override: Option<String>,
    frequency_override: Option<i32>,
    room_id: Option<DbId>,
) -> AppResult<SessionView> {
    let draft = match &wizard {
        WizardState::CarePreview { draft } => draft.clone(),
        other => {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Confirming is not valid in step '{}'",
                other.step_name()
            ))))
        }
    };

    let name = validation::validate_plant_name(name_override.as_deref().unwrap_or(&draft.name))?;
    let watering_frequency_days = frequency_override.unwrap_or(draft.watering_frequency_days);
    validation::validate_frequency(watering_frequency_days)?;

    if let Some(room_id) = room_id {
        ensure_room_owned(state, user_id, room_id).await?;
    }

    let quota = check_plant_limit(&state.pool, user_id).await;
    if !quota.allowed {
        return Err(plant_limit_conflict(quota));
    }

    let input = CreatePlant {
        name,
        room_id,
        photo_url: draft.photo_url,
        watering_frequency_days,
        species: draft.scientific_name,
        care_summary: Some(draft.care_summary),
        care_instructions: Some(draft.care_instructions),
        ai_created: true,
    };
    let plant = PlantRepo::create(&state.pool, user_id, &input).await?;

    // Count the generation only after the plant exists; a failed
    // increment is a real error, not a fail-open case.
    let month = limits::month_key(chrono::Utc::now());
    let usage = AiUsageRepo::increment(&state.pool, user_id, &month).await?;

    let next = wizard.apply(WizardEvent::DraftConfirmed { plant_id: plant.id })?;
    let session = persist(state, user_id, session_id, &next, WizardStatus::Completed).await?;

    tracing::info!(
        session_id,
        user_id,
        plant_id = plant.id,
        generations_used = usage.generation_count,
        "Wizard completed, plant created"
    );

    Ok(view(session, next, Some(present(plant))))
}
