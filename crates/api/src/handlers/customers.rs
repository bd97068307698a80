//! Handlers for the `/customers` resource (invoice form dropdown).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use invodash_db::repositories::CustomerRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /customers
///
/// All customers, alphabetical.
pub async fn list_customers(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let customers = CustomerRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: customers }))
}
