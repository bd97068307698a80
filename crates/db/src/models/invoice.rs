//! Invoice entity models.

use invodash_core::status::InvoiceStatus;
use invodash_core::types::{EntityId, InvoiceDate, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An invoice row. `id` and `date` are immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invoice {
    pub id: EntityId,
    pub customer_id: EntityId,
    /// Minor currency units (cents).
    pub amount: i64,
    pub status: InvoiceStatus,
    /// Creation date, day resolution.
    pub date: InvoiceDate,
    pub created_at: Timestamp,
}

/// One row of the dashboard invoice table: invoice fields joined with the
/// customer's display fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InvoiceListRow {
    pub id: EntityId,
    pub customer_id: EntityId,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: InvoiceDate,
    pub customer_name: String,
    pub customer_email: String,
}
