//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::status::ProjectStatus;
use studio_core::types::{Date, DbId, Timestamp};

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub deadline: Date,
    pub total_value: Option<f64>,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    /// The owning staff profile.
    pub created_by: DbId,
    /// Bound when the proposal is sent.
    pub client_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a project. New projects always start as `draft`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub deadline: Date,
    pub total_value: Option<f64>,
}

/// DTO for updating a draft project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<Date>,
    pub total_value: Option<f64>,
}
