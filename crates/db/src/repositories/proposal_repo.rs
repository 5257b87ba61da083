//! Repository for the `proposals` table.

use sqlx::PgPool;
use studio_core::status::ProposalStatus;
use studio_core::types::DbId;

use crate::models::proposal::{CreateProposal, Proposal};

pub(crate) const COLUMNS: &str =
    "id, project_id, content, status, sent_at, responded_at, created_at, updated_at";

/// Provides CRUD operations for proposals.
pub struct ProposalRepo;

impl ProposalRepo {
    /// Insert a draft proposal.
    ///
    /// Fails with a `uq_proposals_project_id` violation if the project
    /// already has one.
    pub async fn create(pool: &PgPool, input: &CreateProposal) -> Result<Proposal, sqlx::Error> {
        let query = format!(
            "INSERT INTO proposals (project_id, content) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Proposal>(&query)
            .bind(input.project_id)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Proposal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM proposals WHERE id = $1");
        sqlx::query_as::<_, Proposal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<Proposal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM proposals WHERE project_id = $1");
        sqlx::query_as::<_, Proposal>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the content of a draft proposal.
    ///
    /// Returns `None` if the proposal does not exist or is no longer a draft.
    pub async fn update_draft_content(
        pool: &PgPool,
        id: DbId,
        content: &str,
    ) -> Result<Option<Proposal>, sqlx::Error> {
        let query = format!(
            "UPDATE proposals SET content = $2, updated_at = NOW()
             WHERE id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Proposal>(&query)
            .bind(id)
            .bind(content)
            .bind(ProposalStatus::Draft.as_str())
            .fetch_optional(pool)
            .await
    }
}
