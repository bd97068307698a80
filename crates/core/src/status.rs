//! The invoice lifecycle status enumeration.
//!
//! The four lowercase wire strings are used verbatim in storage (the
//! `invoice_status` Postgres enum), in UI filter query parameters, and in
//! JSON payloads. Keep them in sync with the initial migration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of an invoice. Closed set; there is no "other" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "invoice_status", rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Overdue,
    Canceled,
}

/// All statuses, in the order the dashboard presents its filter tabs.
pub const ALL_STATUSES: [InvoiceStatus; 4] = [
    InvoiceStatus::Pending,
    InvoiceStatus::Paid,
    InvoiceStatus::Overdue,
    InvoiceStatus::Canceled,
];

impl InvoiceStatus {
    /// The exact wire string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Canceled => "canceled",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = ();

    /// Case-sensitive: only the exact lowercase wire values are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            "overdue" => Ok(InvoiceStatus::Overdue),
            "canceled" => Ok(InvoiceStatus::Canceled),
            _ => Err(()),
        }
    }
}
