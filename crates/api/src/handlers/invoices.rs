//! Handlers for the `/invoices` resource.
//!
//! Create and update accept urlencoded form bodies (the dashboard posts
//! its invoice form directly) and answer with a 303 redirect to the
//! invoice list on success, or 422 plus the form state on validation
//! failure. The status dropdown and timeline restore go through the
//! direct status transition, which stays in place (no navigation).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use invodash_core::error::CoreError;
use invodash_core::status::InvoiceStatus;
use invodash_core::types::EntityId;
use invodash_core::validation::InvoiceForm;
use invodash_db::models::invoice::InvoiceListRow;
use invodash_db::repositories::{InvoiceRepo, StatusLogRepo};
use serde::{Deserialize, Serialize};

use crate::cache::INVOICES_VIEW_PATH;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::services::invoices as service;
use crate::services::invoices::{Actor, SaveOutcome};
use crate::state::AppState;

/// Rows per dashboard list page.
const ITEMS_PER_PAGE: i64 = 6;

// ---------------------------------------------------------------------------
// Query parameter and body types
// ---------------------------------------------------------------------------

/// Query parameters for the filtered invoice list.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub query: Option<String>,
    pub status: Option<String>,
    pub page: Option<i64>,
}

/// Body for the direct status transition.
#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: InvoiceStatus,
}

/// One rendered page of the invoice list.
#[derive(Debug, Serialize)]
pub struct InvoiceListPage {
    pub items: Vec<InvoiceListRow>,
    pub total_pages: i64,
    pub page: i64,
}

/// Parse the optional status filter query parameter.
///
/// Empty or absent means "all"; anything outside the enumeration is a
/// bad request (wire values are case-sensitive).
fn parse_status_filter(raw: Option<&str>) -> Result<Option<InvoiceStatus>, AppError> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<InvoiceStatus>()
            .map(Some)
            .map_err(|()| AppError::BadRequest(format!("Invalid status filter '{s}'"))),
    }
}

// ---------------------------------------------------------------------------
// List / read handlers
// ---------------------------------------------------------------------------

/// GET /invoices?query=&status=&page=
///
/// Filtered, paginated invoice list. Renderings are cached per query
/// string; mutations invalidate the whole view path.
pub async fn list_invoices(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let query = params.query.as_deref().unwrap_or("");
    let status = parse_status_filter(params.status.as_deref())?;
    let page = params.page.unwrap_or(1).max(1);

    let cache_key = format!(
        "query={query}&status={}&page={page}",
        status.map(|s| s.as_str()).unwrap_or("")
    );

    if let Some(cached) = state.view_cache.get(INVOICES_VIEW_PATH, &cache_key).await {
        return Ok(Json(DataResponse { data: cached }));
    }

    let items = InvoiceRepo::list_page(&state.pool, query, status, page, ITEMS_PER_PAGE).await?;
    let total_pages = InvoiceRepo::count_pages(&state.pool, query, status, ITEMS_PER_PAGE).await?;

    let payload = serde_json::to_value(InvoiceListPage {
        items,
        total_pages,
        page,
    })
    .map_err(|e| AppError::InternalError(format!("Failed to serialize list page: {e}")))?;

    state
        .view_cache
        .put(INVOICES_VIEW_PATH, &cache_key, payload.clone())
        .await;

    Ok(Json(DataResponse { data: payload }))
}

/// GET /invoices/pages?query=&status=
///
/// Total page count for the current filter (pagination control).
pub async fn count_invoice_pages(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let query = params.query.as_deref().unwrap_or("");
    let status = parse_status_filter(params.status.as_deref())?;

    let total_pages = InvoiceRepo::count_pages(&state.pool, query, status, ITEMS_PER_PAGE).await?;
    Ok(Json(DataResponse { data: total_pages }))
}

/// GET /invoices/{id}
pub async fn get_invoice(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let invoice = InvoiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))?;

    Ok(Json(DataResponse { data: invoice }))
}

/// GET /invoices/{id}/logs
///
/// Status transition timeline, most recent entry first.
pub async fn list_invoice_logs(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let entries = StatusLogRepo::list_for_invoice(&state.pool, id).await?;
    Ok(Json(DataResponse { data: entries }))
}

// ---------------------------------------------------------------------------
// Mutation handlers
// ---------------------------------------------------------------------------

/// POST /invoices (form body)
///
/// Create an invoice. 303 to the list on success, 422 + form state on
/// validation or database failure.
pub async fn create_invoice(
    _auth: AuthUser,
    State(state): State<AppState>,
    Form(form): Form<InvoiceForm>,
) -> Response {
    match service::create_invoice(&state, &form).await {
        SaveOutcome::Saved { .. } => Redirect::to(INVOICES_VIEW_PATH).into_response(),
        SaveOutcome::Rejected(form_state) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(form_state)).into_response()
        }
    }
}

/// PUT /invoices/{id} (form body)
///
/// Update an invoice. Missing id is a hard 404; validation or database
/// failure returns 422 + form state; success redirects to the list.
pub async fn update_invoice(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Form(form): Form<InvoiceForm>,
) -> AppResult<Response> {
    let actor = Actor { email: auth.email };
    match service::update_invoice(&state, id, Some(&actor), &form).await? {
        SaveOutcome::Saved { .. } => Ok(Redirect::to(INVOICES_VIEW_PATH).into_response()),
        SaveOutcome::Rejected(form_state) => {
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(form_state)).into_response())
        }
    }
}

/// PATCH /invoices/{id}/status
///
/// Direct status transition (dropdown / timeline restore). In-place
/// action: no navigation, 204 on success.
pub async fn update_invoice_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(body): Json<StatusBody>,
) -> Response {
    let actor = Actor { email: auth.email };
    match service::update_invoice_status(&state, id, Some(&actor), body.status).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => status_update_failure(err),
    }
}

/// POST /invoices/{id}/restore
///
/// Re-apply the old status of the most recent log entry. This records a
/// new forward transition; it never deletes the restored-from entry.
pub async fn restore_invoice_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Response> {
    let latest = StatusLogRepo::latest_for_invoice(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Invoice has no status history to restore".into(),
            ))
        })?;

    let actor = Actor { email: auth.email };
    match service::update_invoice_status(&state, id, Some(&actor), latest.old_status).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(err) => Ok(status_update_failure(err)),
    }
}

/// DELETE /invoices/{id}
///
/// Unconditional delete: idempotent, no confirmation, no log entry.
pub async fn delete_invoice(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    service::delete_invoice(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The generic failure response for direct status transitions. The
/// message is deliberately vague; detail has already gone to the log.
fn status_update_failure(err: service::StatusUpdateError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "error": err.to_string(),
            "code": "STATUS_UPDATE_FAILED",
        })),
    )
        .into_response()
}
