//! Repository for the `contracts` table.

use sqlx::PgPool;
use studio_core::status::ContractStatus;
use studio_core::types::DbId;

use crate::models::contract::{Contract, CreateContract};

pub(crate) const COLUMNS: &str = "id, project_id, content, status, signed_at, signature_data, \
     signer_name, created_at, updated_at";

/// Provides CRUD operations for contracts.
pub struct ContractRepo;

impl ContractRepo {
    /// Insert a draft contract.
    pub async fn create(pool: &PgPool, input: &CreateContract) -> Result<Contract, sqlx::Error> {
        let query = format!(
            "INSERT INTO contracts (project_id, content) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(input.project_id)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contracts WHERE id = $1");
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contracts WHERE project_id = $1");
        sqlx::query_as::<_, Contract>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the content of a draft contract.
    pub async fn update_draft_content(
        pool: &PgPool,
        id: DbId,
        content: &str,
    ) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!(
            "UPDATE contracts SET content = $2, updated_at = NOW()
             WHERE id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .bind(content)
            .bind(ContractStatus::Draft.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Move a draft contract to `sent`.
    ///
    /// Returns `None` if the contract does not exist or is not a draft.
    pub async fn mark_sent(pool: &PgPool, id: DbId) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!(
            "UPDATE contracts SET status = $2, updated_at = NOW()
             WHERE id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .bind(ContractStatus::Sent.as_str())
            .bind(ContractStatus::Draft.as_str())
            .fetch_optional(pool)
            .await
    }
}
