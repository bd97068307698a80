//! Route tree construction.

pub mod health;

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                  sign in (public)
///
/// /customers                   list customers for the invoice form
///
/// /invoices                    list (GET), create (POST, form body)
/// /invoices/pages              total page count for the current filter
/// /invoices/{id}               get, update (PUT, form body), delete
/// /invoices/{id}/status        direct status transition (PATCH)
/// /invoices/{id}/restore       re-apply the latest log entry's old status
/// /invoices/{id}/logs          status transition timeline
/// ```
///
/// Everything except login requires a bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/customers", get(handlers::customers::list_customers))
        .route(
            "/invoices",
            get(handlers::invoices::list_invoices).post(handlers::invoices::create_invoice),
        )
        .route("/invoices/pages", get(handlers::invoices::count_invoice_pages))
        .route(
            "/invoices/{id}",
            get(handlers::invoices::get_invoice)
                .put(handlers::invoices::update_invoice)
                .delete(handlers::invoices::delete_invoice),
        )
        .route(
            "/invoices/{id}/status",
            patch(handlers::invoices::update_invoice_status),
        )
        .route(
            "/invoices/{id}/restore",
            post(handlers::invoices::restore_invoice_status),
        )
        .route("/invoices/{id}/logs", get(handlers::invoices::list_invoice_logs))
}
