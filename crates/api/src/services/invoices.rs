//! Invoice mutation service.
//!
//! Each operation is a short-lived per-request sequence: validate,
//! persist, best-effort audit log, then invalidate the cached list view
//! (strictly after the persistence commit). There is no transaction
//! spanning the invoice write and the log append; the log is best-effort
//! and its failure never undoes the primary mutation.
//!
//! Known limitation: operations on the same invoice id are not
//! serialized. Two concurrent mutations may read the same old status and
//! each append a log entry, leaving the trail inconsistent with the true
//! transition order. There is no locking or optimistic versioning.

use chrono::Utc;
use invodash_core::error::CoreError;
use invodash_core::status::InvoiceStatus;
use invodash_core::types::EntityId;
use invodash_core::validation::{
    validate_invoice_form, InvoiceFieldErrors, InvoiceForm, MSG_MISSING_FIELDS_CREATE,
    MSG_MISSING_FIELDS_UPDATE,
};
use invodash_db::repositories::{InvoiceRepo, StatusLogRepo};
use serde::Serialize;

use crate::cache::INVOICES_VIEW_PATH;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Generic message when the insert itself fails.
pub const MSG_DB_CREATE: &str = "Database Error: Failed to Create Invoice.";
/// Generic message when the update itself fails.
pub const MSG_DB_UPDATE: &str = "Database Error: Failed to Update Invoice.";

/// The acting user credited on audit entries. Passed explicitly into
/// every status-changing operation so the log-append step has no
/// ambient session dependency.
#[derive(Debug, Clone)]
pub struct Actor {
    pub email: String,
}

/// Form outcome returned to the caller when a save does not go through.
/// Mirrors the dashboard form's error contract: field errors for
/// validation failures, a bare message for database failures.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceFormState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<InvoiceFieldErrors>,
    pub message: String,
}

impl InvoiceFormState {
    fn missing_fields(errors: InvoiceFieldErrors, message: &str) -> Self {
        Self {
            errors: Some(errors),
            message: message.to_string(),
        }
    }

    fn database_error(message: &str) -> Self {
        Self {
            errors: None,
            message: message.to_string(),
        }
    }
}

/// Result of a create or update attempt.
#[derive(Debug)]
pub enum SaveOutcome {
    /// Persisted; the caller redirects to the invoice list.
    Saved { id: EntityId },
    /// Not persisted; the caller re-renders the form with this state.
    Rejected(InvoiceFormState),
}

/// Failure of a direct status transition. The message is the entire
/// user-facing contract; detail lives in the log.
#[derive(Debug, thiserror::Error)]
#[error("could not update invoice status")]
pub struct StatusUpdateError;

/// Create an invoice from raw form input.
///
/// Never writes a status-log entry: there is no old status to compare
/// against on initial creation.
pub async fn create_invoice(state: &AppState, form: &InvoiceForm) -> SaveOutcome {
    let validated = match validate_invoice_form(form) {
        Ok(v) => v,
        Err(errors) => {
            return SaveOutcome::Rejected(InvoiceFormState::missing_fields(
                errors,
                MSG_MISSING_FIELDS_CREATE,
            ))
        }
    };

    let date = Utc::now().date_naive();
    let id = match InvoiceRepo::insert(
        &state.pool,
        validated.customer_id,
        validated.amount_cents,
        validated.status,
        date,
    )
    .await
    {
        Ok(id) => id,
        Err(err) => {
            tracing::error!(error = %err, "Failed to create invoice");
            return SaveOutcome::Rejected(InvoiceFormState::database_error(MSG_DB_CREATE));
        }
    };

    state.view_cache.invalidate(INVOICES_VIEW_PATH).await;

    tracing::info!(invoice_id = %id, amount_cents = validated.amount_cents, "Invoice created");
    SaveOutcome::Saved { id }
}

/// Replace an invoice's mutable fields from raw form input.
///
/// The invoice must exist: a missing id propagates as NotFound rather
/// than being folded into the form state. When the update changes the
/// status, a log entry is appended after the update commits; a failed
/// append is swallowed (the update stays committed).
pub async fn update_invoice(
    state: &AppState,
    id: EntityId,
    actor: Option<&Actor>,
    form: &InvoiceForm,
) -> AppResult<SaveOutcome> {
    let validated = match validate_invoice_form(form) {
        Ok(v) => v,
        Err(errors) => {
            return Ok(SaveOutcome::Rejected(InvoiceFormState::missing_fields(
                errors,
                MSG_MISSING_FIELDS_UPDATE,
            )))
        }
    };

    let current = InvoiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))?;

    if let Err(err) = InvoiceRepo::update(
        &state.pool,
        id,
        validated.customer_id,
        validated.amount_cents,
        validated.status,
    )
    .await
    {
        tracing::error!(error = %err, invoice_id = %id, "Failed to update invoice");
        return Ok(SaveOutcome::Rejected(InvoiceFormState::database_error(
            MSG_DB_UPDATE,
        )));
    }

    if current.status != validated.status {
        record_status_change(state, id, current.status, validated.status, actor).await;
    }

    state.view_cache.invalidate(INVOICES_VIEW_PATH).await;

    tracing::info!(invoice_id = %id, "Invoice updated");
    Ok(SaveOutcome::Saved { id })
}

/// Direct status transition, used by the status dropdown and the
/// timeline restore action.
///
/// Any failure in the fetch or the update collapses into the generic
/// [`StatusUpdateError`]; there is no rollback mechanism.
pub async fn update_invoice_status(
    state: &AppState,
    id: EntityId,
    actor: Option<&Actor>,
    new_status: InvoiceStatus,
) -> Result<(), StatusUpdateError> {
    let current = match InvoiceRepo::find_by_id(&state.pool, id).await {
        Ok(Some(invoice)) => invoice,
        Ok(None) => {
            tracing::error!(invoice_id = %id, "Invoice not found during status update");
            return Err(StatusUpdateError);
        }
        Err(err) => {
            tracing::error!(error = %err, invoice_id = %id, "Failed to fetch invoice for status update");
            return Err(StatusUpdateError);
        }
    };

    if let Err(err) = InvoiceRepo::update_status(&state.pool, id, new_status).await {
        tracing::error!(error = %err, invoice_id = %id, "Failed to update invoice status");
        return Err(StatusUpdateError);
    }

    if current.status != new_status {
        record_status_change(state, id, current.status, new_status, actor).await;
    }

    state.view_cache.invalidate(INVOICES_VIEW_PATH).await;

    tracing::info!(
        invoice_id = %id,
        old_status = %current.status,
        new_status = %new_status,
        "Invoice status updated"
    );
    Ok(())
}

/// Delete an invoice unconditionally.
///
/// No existence check, no confirmation, no log entry. Idempotent at the
/// store level; the status-log trail for the id is left intact.
pub async fn delete_invoice(state: &AppState, id: EntityId) -> AppResult<()> {
    InvoiceRepo::delete(&state.pool, id).await?;
    state.view_cache.invalidate(INVOICES_VIEW_PATH).await;

    tracing::info!(invoice_id = %id, "Invoice deleted");
    Ok(())
}

/// Best-effort append of one status-transition entry.
///
/// Callers only invoke this when old and new status differ. With no
/// actor, the entry is skipped unless `audit.log_unattributed` is set,
/// in which case it is recorded with a NULL email. Append failures are
/// logged and swallowed; the invoice mutation has already committed.
async fn record_status_change(
    state: &AppState,
    invoice_id: EntityId,
    old_status: InvoiceStatus,
    new_status: InvoiceStatus,
    actor: Option<&Actor>,
) {
    let email = match actor {
        Some(actor) => Some(actor.email.as_str()),
        None if state.config.audit.log_unattributed => None,
        None => {
            tracing::debug!(
                invoice_id = %invoice_id,
                "No acting user; skipping status log entry"
            );
            return;
        }
    };

    if let Err(err) = StatusLogRepo::append(
        &state.pool,
        invoice_id,
        old_status,
        new_status,
        email,
        Utc::now(),
    )
    .await
    {
        tracing::error!(
            error = %err,
            invoice_id = %invoice_id,
            "Failed to append status log entry"
        );
    }
}
