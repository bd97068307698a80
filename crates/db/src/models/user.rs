//! User entity model for the sign-in flow.

use invodash_core::types::{EntityId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A dashboard user. The password hash never leaves the db/api boundary;
/// `User` is not serialized into any response as-is.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

/// Public user info safe to embed in auth responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: EntityId,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        UserInfo {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
