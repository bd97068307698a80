//! Status log entity model.
//!
//! Log entries are immutable once created; there is no update DTO and
//! no delete path anywhere in the application.

use invodash_core::status::InvoiceStatus;
use invodash_core::types::{EntityId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One recorded status transition on an invoice.
///
/// `old_status`/`new_status` may differ from the invoice's current status
/// when later entries have been appended; consumers read the trail newest
/// first.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusLogEntry {
    pub id: i64,
    pub invoice_id: EntityId,
    pub old_status: InvoiceStatus,
    pub new_status: InvoiceStatus,
    /// Acting user's email; `None` for unattributed entries (see the
    /// `audit.log_unattributed` configuration flag).
    pub email: Option<String>,
    pub date: Timestamp,
}
