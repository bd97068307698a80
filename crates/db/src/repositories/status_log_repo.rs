//! Repository for the `invoice_logs` table.
//!
//! Append-only: this repository exposes no update or delete methods, and
//! none may be added. A failed append must never undo the invoice
//! mutation that triggered it; the service layer owns that policy.

use invodash_core::status::InvoiceStatus;
use invodash_core::types::{EntityId, Timestamp};
use sqlx::PgPool;

use crate::models::status_log::StatusLogEntry;

/// Column list for `invoice_logs` SELECT queries.
const COLUMNS: &str = "id, invoice_id, old_status, new_status, email, date";

/// Provides append and read operations for the status transition trail.
pub struct StatusLogRepo;

impl StatusLogRepo {
    /// Append one immutable transition entry.
    ///
    /// `email` is `None` for unattributed entries.
    pub async fn append(
        pool: &PgPool,
        invoice_id: EntityId,
        old_status: InvoiceStatus,
        new_status: InvoiceStatus,
        email: Option<&str>,
        timestamp: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO invoice_logs (invoice_id, old_status, new_status, email, date) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(invoice_id)
        .bind(old_status)
        .bind(new_status)
        .bind(email)
        .bind(timestamp)
        .fetch_one(pool)
        .await
    }

    /// All transition entries for an invoice, most recent first.
    pub async fn list_for_invoice(
        pool: &PgPool,
        invoice_id: EntityId,
    ) -> Result<Vec<StatusLogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invoice_logs \
             WHERE invoice_id = $1 \
             ORDER BY date DESC, id DESC"
        );
        sqlx::query_as::<_, StatusLogEntry>(&query)
            .bind(invoice_id)
            .fetch_all(pool)
            .await
    }

    /// The most recent transition entry for an invoice, if any.
    pub async fn latest_for_invoice(
        pool: &PgPool,
        invoice_id: EntityId,
    ) -> Result<Option<StatusLogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invoice_logs \
             WHERE invoice_id = $1 \
             ORDER BY date DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, StatusLogEntry>(&query)
            .bind(invoice_id)
            .fetch_optional(pool)
            .await
    }

    /// Number of entries recorded for an invoice.
    pub async fn count_for_invoice(
        pool: &PgPool,
        invoice_id: EntityId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM invoice_logs WHERE invoice_id = $1")
            .bind(invoice_id)
            .fetch_one(pool)
            .await
    }
}
