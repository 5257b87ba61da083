//! Invoice entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::status::InvoiceStatus;
use studio_core::types::{Date, DbId, Timestamp};

/// A row from the `invoices` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invoice {
    pub id: DbId,
    pub project_id: DbId,
    pub payment_id: DbId,
    pub invoice_number: String,
    pub amount: f64,
    pub issue_date: Date,
    pub due_date: Date,
    pub pdf_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: InvoiceStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting an invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoice {
    pub project_id: DbId,
    pub payment_id: DbId,
    pub invoice_number: String,
    pub amount: f64,
    pub issue_date: Date,
    pub due_date: Date,
    pub status: InvoiceStatus,
}
