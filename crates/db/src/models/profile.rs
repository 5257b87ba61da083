//! Profile entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::types::{DbId, Timestamp};

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub email: String,
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    /// One of `studio_core::roles`.
    pub role: String,
    /// Argon2 PHC string. Clients created through a proposal have none.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfile {
    pub email: String,
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub role: String,
    pub password_hash: Option<String>,
}
