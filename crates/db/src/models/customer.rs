//! Customer entity model.
//!
//! Customers are an external concern; this service stores only what the
//! invoice list filter and the create-form dropdown need.

use invodash_core::types::{EntityId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub created_at: Timestamp,
}
