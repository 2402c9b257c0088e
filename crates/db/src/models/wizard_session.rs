//! Add-plant wizard session model.
//!
//! The `state` column holds the serialized
//! [`verdant_core::wizard::WizardState`]; the repository stores it as
//! opaque JSON and the API layer is responsible for decoding it.

use serde::Serialize;
use sqlx::FromRow;
use verdant_core::types::{DbId, Timestamp};

/// A wizard session row from the `wizard_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WizardSession {
    pub id: DbId,
    pub user_id: DbId,
    /// One of `in_progress`, `completed`, `abandoned`.
    pub status: String,
    /// Serialized wizard step machine.
    pub state: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
