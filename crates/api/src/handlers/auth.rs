//! Handlers for the `/auth` resource (credentials sign-in).

use axum::extract::State;
use axum::Json;
use invodash_core::error::CoreError;
use invodash_db::models::user::UserInfo;
use invodash_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// User-facing message for a failed credentials check.
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials.";
/// User-facing message for any other sign-in failure.
pub const MSG_SIGNIN_FAILED: &str = "Something went wrong.";

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// POST /auth/login
///
/// Authenticate with email + password. A wrong email or password both
/// answer "Invalid credentials."; infrastructure failures during
/// verification answer "Something went wrong." with detail in the log.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(MSG_INVALID_CREDENTIALS.into()))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash).map_err(|e| {
        tracing::error!(error = %e, "Password verification error");
        AppError::Core(CoreError::Internal(MSG_SIGNIN_FAILED.into()))
    })?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            MSG_INVALID_CREDENTIALS.into(),
        )));
    }

    let access_token =
        generate_access_token(user.id, &user.email, &state.config.jwt).map_err(|e| {
            tracing::error!(error = %e, "Token generation error");
            AppError::Core(CoreError::Internal(MSG_SIGNIN_FAILED.into()))
        })?;

    tracing::info!(user_id = %user.id, "User signed in");

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo::from(&user),
    }))
}
