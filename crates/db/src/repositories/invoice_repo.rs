//! Repository for the `invoices` table.

use invodash_core::status::InvoiceStatus;
use invodash_core::types::{EntityId, InvoiceDate};
use sqlx::PgPool;

use crate::models::invoice::{Invoice, InvoiceListRow};

/// Column list for `invoices` SELECT queries.
const COLUMNS: &str = "id, customer_id, amount, status, date, created_at";

/// Column list for the dashboard list view (invoice joined with customer).
const LIST_COLUMNS: &str = "\
    invoices.id, invoices.customer_id, invoices.amount, invoices.status, \
    invoices.date, customers.name AS customer_name, customers.email AS customer_email";

/// Case-insensitive substring filter over customer and invoice fields,
/// plus an optional exact status filter. `$1` is the `%query%` pattern,
/// `$2` the optional status.
const LIST_FILTER: &str = "\
    (customers.name ILIKE $1 \
     OR customers.email ILIKE $1 \
     OR invoices.amount::text ILIKE $1 \
     OR invoices.date::text ILIKE $1 \
     OR invoices.status::text ILIKE $1) \
    AND ($2::invoice_status IS NULL OR invoices.status = $2)";

/// Provides CRUD and list-filter operations for invoices.
pub struct InvoiceRepo;

impl InvoiceRepo {
    /// Insert a new invoice, returning the generated id.
    pub async fn insert(
        pool: &PgPool,
        customer_id: EntityId,
        amount_cents: i64,
        status: InvoiceStatus,
        date: InvoiceDate,
    ) -> Result<EntityId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO invoices (customer_id, amount, status, date) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(customer_id)
        .bind(amount_cents)
        .bind(status)
        .bind(date)
        .fetch_one(pool)
        .await
    }

    /// Full replace of the mutable fields by id.
    ///
    /// Silently a no-op when the id does not exist; callers that need
    /// existence semantics fetch first.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        customer_id: EntityId,
        amount_cents: i64,
        status: InvoiceStatus,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE invoices \
             SET customer_id = $2, amount = $3, status = $4 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(customer_id)
        .bind(amount_cents)
        .bind(status)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Status-only update, used by the direct transition path.
    pub async fn update_status(
        pool: &PgPool,
        id: EntityId,
        status: InvoiceStatus,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE invoices SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Delete an invoice by id. Idempotent: deleting an absent id is not
    /// an error.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Fetch a single invoice by id.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invoices WHERE id = $1");
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of the filtered dashboard list, newest invoice date first.
    pub async fn list_page(
        pool: &PgPool,
        query: &str,
        status: Option<InvoiceStatus>,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<InvoiceListRow>, sqlx::Error> {
        let offset = (page.max(1) - 1) * page_size;
        let sql = format!(
            "SELECT {LIST_COLUMNS} \
             FROM invoices \
             JOIN customers ON customers.id = invoices.customer_id \
             WHERE {LIST_FILTER} \
             ORDER BY invoices.date DESC, invoices.created_at DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, InvoiceListRow>(&sql)
            .bind(like_pattern(query))
            .bind(status)
            .bind(page_size)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of pages the filtered list occupies at `page_size`
    /// rows per page.
    pub async fn count_pages(
        pool: &PgPool,
        query: &str,
        status: Option<InvoiceStatus>,
        page_size: i64,
    ) -> Result<i64, sqlx::Error> {
        let sql = format!(
            "SELECT COUNT(*)::BIGINT \
             FROM invoices \
             JOIN customers ON customers.id = invoices.customer_id \
             WHERE {LIST_FILTER}"
        );
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(like_pattern(query))
            .bind(status)
            .fetch_one(pool)
            .await?;
        Ok((count + page_size - 1) / page_size)
    }
}

/// Escape LIKE metacharacters and wrap in `%...%`.
fn like_pattern(query: &str) -> String {
    let escaped = query.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    format!("%{escaped}%")
}
