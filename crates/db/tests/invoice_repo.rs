//! Integration tests for invoice CRUD and list filtering against a real
//! database.

use chrono::NaiveDate;
use invodash_core::status::InvoiceStatus;
use invodash_db::repositories::{CustomerRepo, InvoiceRepo};
use sqlx::PgPool;
use uuid::Uuid;

const PAGE_SIZE: i64 = 6;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn seed_customer(pool: &PgPool, name: &str, email: &str) -> Uuid {
    CustomerRepo::create(pool, name, email)
        .await
        .expect("customer insert should succeed")
}

#[sqlx::test]
async fn insert_and_find_round_trip(pool: PgPool) {
    let customer = seed_customer(&pool, "Acme Corp", "billing@acme.test").await;

    let id = InvoiceRepo::insert(&pool, customer, 4250, InvoiceStatus::Pending, date(2026, 8, 1))
        .await
        .unwrap();

    let invoice = InvoiceRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(invoice.customer_id, customer);
    assert_eq!(invoice.amount, 4250);
    assert_eq!(invoice.status, InvoiceStatus::Pending);
    assert_eq!(invoice.date, date(2026, 8, 1));
}

#[sqlx::test]
async fn insert_with_unknown_customer_fails(pool: PgPool) {
    let result = InvoiceRepo::insert(
        &pool,
        Uuid::new_v4(),
        1000,
        InvoiceStatus::Pending,
        date(2026, 8, 1),
    )
    .await;
    assert!(result.is_err(), "FK violation should surface as a DB error");
}

#[sqlx::test]
async fn update_replaces_mutable_fields_only(pool: PgPool) {
    let customer = seed_customer(&pool, "Acme Corp", "billing@acme.test").await;
    let other = seed_customer(&pool, "Globex", "ap@globex.test").await;

    let id = InvoiceRepo::insert(&pool, customer, 1000, InvoiceStatus::Pending, date(2026, 1, 5))
        .await
        .unwrap();

    InvoiceRepo::update(&pool, id, other, 2500, InvoiceStatus::Paid)
        .await
        .unwrap();

    let invoice = InvoiceRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(invoice.customer_id, other);
    assert_eq!(invoice.amount, 2500);
    assert_eq!(invoice.status, InvoiceStatus::Paid);
    // The creation date never moves.
    assert_eq!(invoice.date, date(2026, 1, 5));
}

#[sqlx::test]
async fn update_of_missing_id_is_a_silent_noop(pool: PgPool) {
    let customer = seed_customer(&pool, "Acme Corp", "billing@acme.test").await;
    InvoiceRepo::update(&pool, Uuid::new_v4(), customer, 100, InvoiceStatus::Paid)
        .await
        .expect("updating an absent id should not error");
}

#[sqlx::test]
async fn delete_is_idempotent(pool: PgPool) {
    let customer = seed_customer(&pool, "Acme Corp", "billing@acme.test").await;
    let id = InvoiceRepo::insert(&pool, customer, 1000, InvoiceStatus::Paid, date(2026, 2, 2))
        .await
        .unwrap();

    InvoiceRepo::delete(&pool, id).await.unwrap();
    assert!(InvoiceRepo::find_by_id(&pool, id).await.unwrap().is_none());

    // Second delete of the same id, and a delete of a never-existing id.
    InvoiceRepo::delete(&pool, id).await.unwrap();
    InvoiceRepo::delete(&pool, Uuid::new_v4()).await.unwrap();
}

#[sqlx::test]
async fn list_filters_by_customer_substring_case_insensitively(pool: PgPool) {
    let acme = seed_customer(&pool, "Acme Corp", "billing@acme.test").await;
    let globex = seed_customer(&pool, "Globex", "ap@globex.test").await;

    InvoiceRepo::insert(&pool, acme, 1000, InvoiceStatus::Pending, date(2026, 3, 1))
        .await
        .unwrap();
    InvoiceRepo::insert(&pool, globex, 2000, InvoiceStatus::Paid, date(2026, 3, 2))
        .await
        .unwrap();

    let rows = InvoiceRepo::list_page(&pool, "ACME", None, 1, PAGE_SIZE)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].customer_name, "Acme Corp");
}

#[sqlx::test]
async fn list_filters_by_status(pool: PgPool) {
    let customer = seed_customer(&pool, "Acme Corp", "billing@acme.test").await;
    InvoiceRepo::insert(&pool, customer, 1000, InvoiceStatus::Pending, date(2026, 3, 1))
        .await
        .unwrap();
    InvoiceRepo::insert(&pool, customer, 2000, InvoiceStatus::Overdue, date(2026, 3, 2))
        .await
        .unwrap();

    let rows = InvoiceRepo::list_page(&pool, "", Some(InvoiceStatus::Overdue), 1, PAGE_SIZE)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, InvoiceStatus::Overdue);
}

#[sqlx::test]
async fn list_orders_newest_date_first(pool: PgPool) {
    let customer = seed_customer(&pool, "Acme Corp", "billing@acme.test").await;
    InvoiceRepo::insert(&pool, customer, 1000, InvoiceStatus::Paid, date(2026, 1, 1))
        .await
        .unwrap();
    InvoiceRepo::insert(&pool, customer, 2000, InvoiceStatus::Paid, date(2026, 6, 1))
        .await
        .unwrap();

    let rows = InvoiceRepo::list_page(&pool, "", None, 1, PAGE_SIZE).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].amount, 2000);
    assert_eq!(rows[1].amount, 1000);
}

#[sqlx::test]
async fn count_pages_rounds_up(pool: PgPool) {
    let customer = seed_customer(&pool, "Acme Corp", "billing@acme.test").await;
    for day in 1..=7 {
        InvoiceRepo::insert(&pool, customer, 100, InvoiceStatus::Pending, date(2026, 4, day))
            .await
            .unwrap();
    }

    // 7 rows at 6 per page is 2 pages.
    let pages = InvoiceRepo::count_pages(&pool, "", None, PAGE_SIZE).await.unwrap();
    assert_eq!(pages, 2);

    // No matches is zero pages.
    let pages = InvoiceRepo::count_pages(&pool, "no-such-customer", None, PAGE_SIZE)
        .await
        .unwrap();
    assert_eq!(pages, 0);
}
