//! Contract entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::status::ContractStatus;
use studio_core::types::{DbId, Timestamp};

/// A row from the `contracts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contract {
    pub id: DbId,
    pub project_id: DbId,
    pub content: String,
    #[sqlx(try_from = "String")]
    pub status: ContractStatus,
    pub signed_at: Option<Timestamp>,
    /// `data:image/png;base64,...` exactly as captured on the signing pad.
    pub signature_data: Option<String>,
    pub signer_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a draft contract.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContract {
    pub project_id: DbId,
    pub content: String,
}
