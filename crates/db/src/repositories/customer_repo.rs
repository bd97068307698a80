//! Repository for the `customers` table.

use invodash_core::types::EntityId;
use sqlx::PgPool;

use crate::models::customer::Customer;

/// Column list for `customers` queries.
const COLUMNS: &str = "id, name, email, created_at";

/// Read and create operations for customers. The dashboard only needs
/// enough to populate the invoice form dropdown and the list filter.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Create a customer, returning the generated id.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        email: &str,
    ) -> Result<EntityId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO customers (name, email) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(email)
        .fetch_one(pool)
        .await
    }

    /// All customers, alphabetical, for the invoice form dropdown.
    pub async fn list(pool: &PgPool) -> Result<Vec<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers ORDER BY name ASC");
        sqlx::query_as::<_, Customer>(&query).fetch_all(pool).await
    }
}
