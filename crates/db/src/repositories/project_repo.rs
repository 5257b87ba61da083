//! Repository for the `projects` table.

use sqlx::PgPool;
use studio_core::status::ProjectStatus;
use studio_core::types::DbId;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, title, description, deadline, total_value, status, \
     created_by, client_id, created_at, updated_at";

/// Provides CRUD operations for projects.
///
/// Status changes other than creation go through
/// [`LifecycleRepo`](super::LifecycleRepo).
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new draft project owned by `created_by`.
    pub async fn create(
        pool: &PgPool,
        created_by: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, description, deadline, total_value, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.deadline)
            .bind(input.total_value)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the projects owned by `created_by`, newest first.
    pub async fn list_by_owner(
        pool: &PgPool,
        created_by: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE created_by = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(created_by)
            .fetch_all(pool)
            .await
    }

    /// Update a draft project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no draft project with the given `id` exists.
    pub async fn update_draft(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                deadline = COALESCE($4, deadline),
                total_value = COALESCE($5, total_value),
                updated_at = NOW()
             WHERE id = $1 AND status = $6
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.deadline)
            .bind(input.total_value)
            .bind(ProjectStatus::Draft.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Delete a draft project. Returns `true` if a row was removed.
    pub async fn delete_draft(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND status = $2")
            .bind(id)
            .bind(ProjectStatus::Draft.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Status and value of every project owned by `created_by`, for the
    /// dashboard counters.
    pub async fn status_values_by_owner(
        pool: &PgPool,
        created_by: DbId,
    ) -> Result<Vec<(ProjectStatus, Option<f64>)>, sqlx::Error> {
        let rows: Vec<(String, Option<f64>)> =
            sqlx::query_as("SELECT status, total_value FROM projects WHERE created_by = $1")
                .bind(created_by)
                .fetch_all(pool)
                .await?;
        rows.into_iter()
            .map(|(status, value)| {
                let status = status
                    .parse::<ProjectStatus>()
                    .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
                Ok((status, value))
            })
            .collect()
    }
}
