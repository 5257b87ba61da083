//! Payment entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::status::PaymentStatus;
use studio_core::types::{DbId, Timestamp};

/// A row from the `payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub project_id: DbId,
    pub contract_id: Option<DbId>,
    pub amount: f64,
    #[sqlx(try_from = "String")]
    pub status: PaymentStatus,
    pub stripe_session_id: Option<String>,
    pub stripe_payment_intent_id: Option<String>,
    pub paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a freshly opened checkout. Payments start `pending`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePayment {
    pub project_id: DbId,
    pub contract_id: Option<DbId>,
    pub amount: f64,
    pub stripe_session_id: String,
}
