//! User entity model.
//!
//! Accounts are created and authenticated by the external auth
//! service; this backend only mirrors the rows it needs for ownership
//! checks and foreign keys.

use serde::Serialize;
use sqlx::FromRow;
use verdant_core::types::{DbId, Timestamp};

/// A user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub display_name: String,
    pub created_at: Timestamp,
}
