//! Proposal entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::status::ProposalStatus;
use studio_core::types::{DbId, Timestamp};

/// A row from the `proposals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Proposal {
    pub id: DbId,
    pub project_id: DbId,
    pub content: String,
    #[sqlx(try_from = "String")]
    pub status: ProposalStatus,
    pub sent_at: Option<Timestamp>,
    pub responded_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a draft proposal.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProposal {
    pub project_id: DbId,
    pub content: String,
}
