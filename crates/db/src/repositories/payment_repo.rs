//! Repository for the `payments` table.

use sqlx::PgPool;
use studio_core::status::PaymentStatus;
use studio_core::types::DbId;

use crate::models::payment::{CreatePayment, Payment};

pub(crate) const COLUMNS: &str = "id, project_id, contract_id, amount, status, stripe_session_id, \
     stripe_payment_intent_id, paid_at, created_at, updated_at";

/// Provides inserts and lookups for payments. Settlement lives in
/// [`LifecycleRepo::settle_payment`](super::LifecycleRepo::settle_payment).
pub struct PaymentRepo;

impl PaymentRepo {
    /// Record a pending payment for a newly opened checkout session.
    pub async fn create(pool: &PgPool, input: &CreatePayment) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments (project_id, contract_id, amount, stripe_session_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(input.project_id)
            .bind(input.contract_id)
            .bind(input.amount)
            .bind(&input.stripe_session_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_session_id(
        pool: &PgPool,
        session_id: &str,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payments WHERE stripe_session_id = $1");
        sqlx::query_as::<_, Payment>(&query)
            .bind(session_id)
            .fetch_optional(pool)
            .await
    }

    /// The most recent payment opened for a project, if any.
    pub async fn find_latest_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments WHERE project_id = $1
             ORDER BY created_at DESC LIMIT 1"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// The payment that settled the project, regardless of checkouts
    /// opened after it.
    pub async fn find_completed_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments WHERE project_id = $1 AND status = $2
             ORDER BY paid_at ASC LIMIT 1"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(project_id)
            .bind(PaymentStatus::Completed.as_str())
            .fetch_optional(pool)
            .await
    }
}
