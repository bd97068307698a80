//! Invoice form validation.
//!
//! Parses raw, untyped form fields into a typed invoice record or a
//! structured set of per-field error messages. All field failures are
//! accumulated so the form can show every problem at once; nothing is
//! persisted when any field fails.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::InvoiceStatus;

/// Error message for a missing or unparseable customer id.
pub const ERR_CUSTOMER: &str = "Please select a customer.";
/// Error message for a non-positive or unparseable amount.
pub const ERR_AMOUNT: &str = "Please enter an amount greater than $0.";
/// Error message for a status outside the enumeration.
pub const ERR_STATUS: &str = "Please select an invoice status.";

/// Summary message attached when create-form validation fails.
pub const MSG_MISSING_FIELDS_CREATE: &str = "Missing Fields. Failed to Create Invoice.";
/// Summary message attached when update-form validation fails.
pub const MSG_MISSING_FIELDS_UPDATE: &str = "Missing Fields. Failed to Update Invoice.";

/// Raw invoice form fields as submitted. Every field is optional text;
/// the validation layer owns all coercion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceForm {
    #[serde(default, rename = "customerId")]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A validated invoice record, ready for persistence.
///
/// `amount_cents` is the presented dollar amount multiplied by 100 and
/// rounded to the nearest integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedInvoice {
    pub customer_id: Uuid,
    pub amount_cents: i64,
    pub status: InvoiceStatus,
}

/// Per-field validation error messages. Fields with no errors serialize
/// as empty arrays, matching the form's field-error rendering contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvoiceFieldErrors {
    #[serde(rename = "customerId")]
    pub customer_id: Vec<String>,
    pub amount: Vec<String>,
    pub status: Vec<String>,
}

impl InvoiceFieldErrors {
    pub fn is_empty(&self) -> bool {
        self.customer_id.is_empty() && self.amount.is_empty() && self.status.is_empty()
    }
}

/// Validate a raw invoice form.
///
/// Returns the typed record on success, or the accumulated field errors.
/// The caller attaches the appropriate "Missing Fields" summary message.
pub fn validate_invoice_form(form: &InvoiceForm) -> Result<ValidatedInvoice, InvoiceFieldErrors> {
    let mut errors = InvoiceFieldErrors::default();

    let customer_id = form
        .customer_id
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| s.trim().parse::<Uuid>().ok());
    if customer_id.is_none() {
        errors.customer_id.push(ERR_CUSTOMER.to_string());
    }

    let amount = form
        .amount
        .as_deref()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|a| *a > 0.0);
    if amount.is_none() {
        errors.amount.push(ERR_AMOUNT.to_string());
    }

    let status = form
        .status
        .as_deref()
        .and_then(|s| s.parse::<InvoiceStatus>().ok());
    if status.is_none() {
        errors.status.push(ERR_STATUS.to_string());
    }

    match (customer_id, amount, status) {
        (Some(customer_id), Some(amount), Some(status)) => Ok(ValidatedInvoice {
            customer_id,
            amount_cents: (amount * 100.0).round() as i64,
            status,
        }),
        _ => Err(errors),
    }
}
