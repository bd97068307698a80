//! HTTP-level tests for credentials sign-in.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, seed_user};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn login_returns_a_usable_token(pool: PgPool) {
    seed_user(&pool, "user@nextmail.com", "123456").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        serde_json::json!({"email": "user@nextmail.com", "password": "123456"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let token = json["access_token"].as_str().unwrap();
    assert_eq!(json["user"]["email"], "user@nextmail.com");
    assert!(json["expires_in"].as_i64().unwrap() > 0);

    // The issued token authenticates a protected endpoint.
    let response = get(app, "/api/v1/invoices", &format!("Bearer {token}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_password_is_rejected(pool: PgPool) {
    seed_user(&pool, "user@nextmail.com", "123456").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({"email": "user@nextmail.com", "password": "654321"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid credentials.");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_email_gets_the_same_answer_as_a_wrong_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({"email": "nobody@nextmail.com", "password": "123456"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid credentials.");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn infrastructure_failure_answers_generically(pool: PgPool) {
    // A corrupt stored hash makes verification error out rather than
    // simply mismatch.
    sqlx::query(
        "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3)",
    )
    .bind("Broken User")
    .bind("broken@nextmail.com")
    .bind("not-a-phc-string")
    .execute(&pool)
    .await
    .unwrap();

    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({"email": "broken@nextmail.com", "password": "123456"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Something went wrong.");
}
