//! Add-plant wizard state machine.
//!
//! The wizard walks a user from a photo upload through AI
//! identification and care generation to a confirmed plant. Each step
//! is a tagged variant carrying exactly the data that step has
//! accumulated, and [`WizardState::apply`] is the only way to move
//! between steps; illegal transitions are rejected with a conflict.
//!
//! The API layer persists the current state as JSON between requests
//! and drives the `Identifying`/`GeneratingCare` steps by calling the
//! AI provider, feeding the outcome back in as an event.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::identify::{CareInstructions, Identification};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Session status
// ---------------------------------------------------------------------------

/// Lifecycle status of a wizard session row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStatus {
    InProgress,
    Completed,
    Abandoned,
}

impl WizardStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "abandoned" => Ok(Self::Abandoned),
            _ => Err(CoreError::Validation(format!(
                "Invalid wizard status '{s}'. Must be one of: in_progress, completed, abandoned"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        }
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// The plant-to-be shown on the care-preview step. The user may still
/// adjust the name and frequency before confirming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantDraft {
    pub name: String,
    pub scientific_name: Option<String>,
    pub photo_url: Option<String>,
    pub watering_frequency_days: i32,
    pub care_summary: String,
    pub care_instructions: String,
}

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

/// One step of the wizard, carrying the data accumulated so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum WizardState {
    /// Waiting for the user to upload a photo (or skip it).
    PhotoUpload,
    /// An identification call is in flight for the uploaded photo.
    Identifying { photo_url: String },
    /// Identification succeeded with enough confidence; waiting for the
    /// user to accept or reject it.
    IdentificationResult {
        photo_url: String,
        identification: Identification,
    },
    /// Identification failed, was rejected, or the photo was skipped;
    /// waiting for a manually entered name.
    ManualName { photo_url: Option<String> },
    /// A care-generation call is in flight for the chosen name.
    GeneratingCare {
        photo_url: Option<String>,
        scientific_name: Option<String>,
        name: String,
    },
    /// Care text is ready; waiting for the user to confirm the draft.
    CarePreview { draft: PlantDraft },
    /// The plant was created; collecting optional feedback.
    Feedback { plant_id: DbId },
}

impl WizardState {
    /// Short name of the step, used in conflict messages and logs.
    pub fn step_name(&self) -> &'static str {
        match self {
            Self::PhotoUpload => "photo_upload",
            Self::Identifying { .. } => "identifying",
            Self::IdentificationResult { .. } => "identification_result",
            Self::ManualName { .. } => "manual_name",
            Self::GeneratingCare { .. } => "generating_care",
            Self::CarePreview { .. } => "care_preview",
            Self::Feedback { .. } => "feedback",
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Something that happened to the wizard: a user action or the outcome
/// of an AI call.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    PhotoUploaded { photo_url: String },
    PhotoSkipped,
    IdentificationSucceeded { identification: Identification },
    IdentificationFailed,
    ResultAccepted,
    ResultRejected,
    NameEntered { name: String },
    CareGenerated { care: CareInstructions },
    CareGenerationFailed,
    DraftConfirmed { plant_id: DbId },
}

impl WizardEvent {
    /// Short name of the event, used in conflict messages and logs.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::PhotoUploaded { .. } => "photo_uploaded",
            Self::PhotoSkipped => "photo_skipped",
            Self::IdentificationSucceeded { .. } => "identification_succeeded",
            Self::IdentificationFailed => "identification_failed",
            Self::ResultAccepted => "result_accepted",
            Self::ResultRejected => "result_rejected",
            Self::NameEntered { .. } => "name_entered",
            Self::CareGenerated { .. } => "care_generated",
            Self::CareGenerationFailed => "care_generation_failed",
            Self::DraftConfirmed { .. } => "draft_confirmed",
        }
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

impl WizardState {
    /// The initial step of every session.
    pub fn initial() -> Self {
        Self::PhotoUpload
    }

    /// Apply an event, producing the next state.
    ///
    /// Returns `CoreError::Conflict` for any (state, event) pair not in
    /// the transition table; the session is left as-is by callers in
    /// that case.
    pub fn apply(self, event: WizardEvent) -> Result<WizardState, CoreError> {
        use WizardEvent as E;
        use WizardState as S;

        let step = self.step_name();
        let name = event.event_name();

        let next = match (self, event) {
            (S::PhotoUpload, E::PhotoUploaded { photo_url }) => S::Identifying { photo_url },
            (S::PhotoUpload, E::PhotoSkipped) => S::ManualName { photo_url: None },

            (S::Identifying { photo_url }, E::IdentificationSucceeded { identification }) => {
                S::IdentificationResult {
                    photo_url,
                    identification,
                }
            }
            (S::Identifying { photo_url }, E::IdentificationFailed) => S::ManualName {
                photo_url: Some(photo_url),
            },

            (
                S::IdentificationResult {
                    photo_url,
                    identification,
                },
                E::ResultAccepted,
            ) => S::GeneratingCare {
                photo_url: Some(photo_url),
                scientific_name: Some(identification.scientific_name),
                name: identification.common_name,
            },
            (S::IdentificationResult { photo_url, .. }, E::ResultRejected) => S::ManualName {
                photo_url: Some(photo_url),
            },

            (S::ManualName { photo_url }, E::NameEntered { name }) => S::GeneratingCare {
                photo_url,
                scientific_name: None,
                name,
            },

            (
                S::GeneratingCare {
                    photo_url,
                    scientific_name,
                    name,
                },
                E::CareGenerated { care },
            ) => S::CarePreview {
                draft: PlantDraft {
                    name,
                    scientific_name,
                    photo_url,
                    watering_frequency_days: care.watering_frequency_days,
                    care_instructions: format_care_instructions(&care),
                    care_summary: care.summary,
                },
            },
            // Generation failure keeps the step so the caller can retry.
            (
                state @ S::GeneratingCare { .. },
                E::CareGenerationFailed,
            ) => state,

            (S::CarePreview { .. }, E::DraftConfirmed { plant_id }) => S::Feedback { plant_id },

            (_, _) => {
                return Err(CoreError::Conflict(format!(
                    "Event '{name}' is not valid in step '{step}'"
                )))
            }
        };

        Ok(next)
    }
}

/// Flatten structured care text into the free-text instructions field
/// stored on the plant.
fn format_care_instructions(care: &CareInstructions) -> String {
    format!(
        "Light: {}\nWater: {}\nSoil: {}\nTemperature: {}",
        care.light, care.water, care.soil, care.temperature
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
