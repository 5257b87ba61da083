//! Repository for the `invoices` table.

use sqlx::PgPool;
use studio_core::types::DbId;

use crate::models::invoice::Invoice;

pub(crate) const COLUMNS: &str = "id, project_id, payment_id, invoice_number, amount, issue_date, \
     due_date, pdf_url, status, created_at, updated_at";

/// Read access to invoices. Invoices are only written during payment
/// settlement.
pub struct InvoiceRepo;

impl InvoiceRepo {
    pub async fn find_by_payment(
        pool: &PgPool,
        payment_id: DbId,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invoices WHERE payment_id = $1");
        sqlx::query_as::<_, Invoice>(&query)
            .bind(payment_id)
            .fetch_optional(pool)
            .await
    }

    /// List the invoices of a project, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Invoice>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invoices WHERE project_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
