//! API integration tests
//!
//! Each test mounts the full router over a fresh in-memory SQLite store
//! seeded with the development fixture (4 users, 7 books) and drives it
//! in-process.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use library_server::{
    api, config::AppConfig, repository::Repository, seed, services::Services, AppState,
};

const BASE: &str = "/library/v1";

async fn test_app_with_config(config: AppConfig) -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    seed::load(&pool).await.expect("Failed to seed fixture");

    let repository = Repository::new(pool);
    let services = Services::new(repository);

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    api::router(state)
}

async fn test_app() -> Router {
    test_app_with_config(AppConfig::default()).await
}

async fn send(app: &Router, method: Method, path: &str) -> (StatusCode, HeaderMap, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(path)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response body")
    };

    (status, headers, body)
}

async fn get(app: &Router, path: &str) -> (StatusCode, Value) {
    let (status, _, body) = send(app, Method::GET, path).await;
    (status, body)
}

async fn post(app: &Router, path: &str) -> (StatusCode, HeaderMap, Value) {
    send(app, Method::POST, path).await
}

fn parse_date(value: &Value) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value.as_str().expect("Date is not a string"))
        .expect("Date is not RFC 3339")
        .with_timezone(&Utc)
}

#[tokio::test]
async fn health_check() {
    let app = test_app().await;

    let (status, body) = get(&app, &format!("{}/health", BASE)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = test_app().await;

    let (status, body) = get(&app, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/users"].is_object());
    assert!(body["paths"]["/checkouts"].is_object());
    assert_eq!(body["servers"][0]["url"], "/library/v1");
}

#[tokio::test]
async fn openapi_server_url_follows_configured_base_path() {
    let config = AppConfig {
        api: library_server::config::ApiConfig {
            name: "archive".to_string(),
            version: "v2".to_string(),
        },
        ..AppConfig::default()
    };
    let app = test_app_with_config(config).await;

    let (status, body) = get(&app, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["servers"][0]["url"], "/archive/v2");

    // The API itself is mounted under the same base path
    let (status, body) = get(&app, "/archive/v2/users/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstname"], "J.P.");
}

#[tokio::test]
async fn list_users_returns_seeded_users() {
    let app = test_app().await;

    let (status, body) = get(&app, &format!("{}/users", BASE)).await;
    assert_eq!(status, StatusCode::OK);

    let users = body.as_array().expect("Expected an array");
    assert_eq!(users.len(), 4);
    assert_eq!(users[0]["firstname"], "J.P.");
    assert_eq!(users[0]["lastname"], "Hutchins");
    assert_eq!(users[0]["email"], "jphutchins@gmail.com");
    assert_eq!(users[0]["book_limit"], 3);
    assert_eq!(users[0]["books_checked_out"], 0);
    assert_eq!(users[0]["uri"], "/users/1");
}

#[tokio::test]
async fn get_user_exists() {
    let app = test_app().await;

    let (status, body) = get(&app, &format!("{}/users/1", BASE)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstname"], "J.P.");
    assert_eq!(body["lastname"], "Hutchins");
    assert_eq!(body["books_checked_out"], 0);
    assert_eq!(body["checkouts"], Value::Array(vec![]));
}

#[tokio::test]
async fn get_user_does_not_exist() {
    let app = test_app().await;

    let (status, body) = get(&app, &format!("{}/users/99999", BASE)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User 99999 does not exist.");
}

#[tokio::test]
async fn user_checkouts_for_missing_user() {
    let app = test_app().await;

    let (status, body) = get(&app, &format!("{}/users/999/checkouts", BASE)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User 999 does not exist.");
}

#[tokio::test]
async fn user_can_checkout_book() {
    let app = test_app().await;

    // User checkouts is empty
    let (_, body) = get(&app, &format!("{}/users/1/checkouts", BASE)).await;
    assert_eq!(body, Value::Array(vec![]));
    // Global checkouts is empty
    let (_, body) = get(&app, &format!("{}/checkouts", BASE)).await;
    assert_eq!(body, Value::Array(vec![]));

    // User checkout succeeds
    let (status, headers, body) = post(&app, &format!("{}/users/1/checkout/1", BASE)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some(format!("{}/users/1/checkouts", BASE).as_str())
    );

    // Due date is the fixed 13-day loan period from now
    let due_date = parse_date(&body["due_date"]);
    let expected = Utc::now() + Duration::days(13);
    assert!((expected - due_date).num_seconds().abs() < 60);

    // User checkouts contains the book, with its title
    let (_, body) = get(&app, &format!("{}/users/1/checkouts", BASE)).await;
    assert_eq!(body[0]["book_id"], 1);
    assert_eq!(body[0]["title"], "Book A");

    // Global checkouts contains the book
    let (_, body) = get(&app, &format!("{}/checkouts", BASE)).await;
    assert_eq!(body[0]["book_id"], 1);
    assert_eq!(body[0]["user_id"], 1);
    assert_eq!(body[0]["title"], "Book A");
}

#[tokio::test]
async fn checkout_days_parameter_does_not_change_due_date() {
    let app = test_app().await;

    let (status, _, body) = post(&app, &format!("{}/users/1/checkout/1?days=1", BASE)).await;
    assert_eq!(status, StatusCode::CREATED);

    let due_date = parse_date(&body["due_date"]);
    let expected = Utc::now() + Duration::days(13);
    assert!((expected - due_date).num_seconds().abs() < 60);
}

#[tokio::test]
async fn user_cannot_checkout_over_limit() {
    let app = test_app().await;

    for book_id in 1..=3 {
        let (status, _, _) =
            post(&app, &format!("{}/users/1/checkout/{}", BASE, book_id)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = get(&app, &format!("{}/users/1", BASE)).await;
    assert_eq!(body["book_limit"], 3);
    assert_eq!(body["books_checked_out"], 3);

    // Try to checkout 4th book
    let (status, _, body) = post(&app, &format!("{}/users/1/checkout/4", BASE)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User has reached checkout limit of 3");

    // State is the same as before
    let (_, body) = get(&app, &format!("{}/users/1", BASE)).await;
    assert_eq!(body["books_checked_out"], 3);

    // Book 4 is not checked out
    let (_, body) = get(&app, &format!("{}/checkouts", BASE)).await;
    for checkout in body.as_array().expect("Expected an array") {
        assert_ne!(checkout["book_id"], 4);
    }
}

#[tokio::test]
async fn user_cannot_checkout_book_that_is_checked_out() {
    let app = test_app().await;

    let (status, _, _) = post(&app, &format!("{}/users/1/checkout/1", BASE)).await;
    assert_eq!(status, StatusCode::CREATED);

    // Same user tries again
    let (status, _, body) = post(&app, &format!("{}/users/1/checkout/1", BASE)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Book 1 is already checked out.");

    // Another user tries to checkout the same book
    let (status, _, body) = post(&app, &format!("{}/users/2/checkout/1", BASE)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Book 1 is already checked out.");
}

#[tokio::test]
async fn checkout_missing_book() {
    let app = test_app().await;

    let (status, _, body) = post(&app, &format!("{}/users/1/checkout/999", BASE)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Book 999 does not exist.");
}

#[tokio::test]
async fn checkout_missing_user_wins_over_missing_book() {
    let app = test_app().await;

    // Both ids are absent; the user check comes first
    let (status, _, body) = post(&app, &format!("{}/users/999/checkout/999", BASE)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User 999 does not exist.");
}

#[tokio::test]
async fn user_can_return_book() {
    let app = test_app().await;

    post(&app, &format!("{}/users/1/checkout/1", BASE)).await;
    let (_, body) = get(&app, &format!("{}/users/1", BASE)).await;
    assert_eq!(body["books_checked_out"], 1);

    // Return book
    let (status, headers, body) = post(&app, &format!("{}/users/1/return/1", BASE)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "success");
    assert_eq!(
        headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some(format!("{}/users/1/checkouts", BASE).as_str())
    );

    // User has no checkouts
    let (_, body) = get(&app, &format!("{}/users/1", BASE)).await;
    assert_eq!(body["books_checked_out"], 0);
    let (_, body) = get(&app, &format!("{}/users/1/checkouts", BASE)).await;
    assert_eq!(body, Value::Array(vec![]));

    // Global checkouts is empty
    let (_, body) = get(&app, &format!("{}/checkouts", BASE)).await;
    assert_eq!(body, Value::Array(vec![]));
}

#[tokio::test]
async fn user_cannot_return_book_they_did_not_checkout() {
    let app = test_app().await;

    // No checkout at all
    let (status, _, body) = post(&app, &format!("{}/users/1/return/1", BASE)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User 1 has not checked out Book 1.");

    // Book is checked out, but by someone else
    post(&app, &format!("{}/users/2/checkout/1", BASE)).await;
    let (status, _, body) = post(&app, &format!("{}/users/1/return/1", BASE)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User 1 has not checked out Book 1.");
}

#[tokio::test]
async fn return_missing_user() {
    let app = test_app().await;

    let (status, _, body) = post(&app, &format!("{}/users/999/return/1", BASE)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User 999 does not exist.");
}

#[tokio::test]
async fn checkouts_ordered_by_due_date() {
    let app = test_app().await;

    for (user_id, book_id) in [(1, 1), (3, 2), (1, 3), (2, 4), (3, 5), (4, 6)] {
        let (status, _, _) =
            post(&app, &format!("{}/users/{}/checkout/{}", BASE, user_id, book_id)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = get(&app, &format!("{}/checkouts", BASE)).await;
    assert_eq!(status, StatusCode::OK);

    let checkouts = body.as_array().expect("Expected an array");
    assert_eq!(checkouts.len(), 6);
    let dates: Vec<_> = checkouts
        .iter()
        .map(|c| parse_date(&c["due_date"]))
        .collect();
    assert!(dates.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn list_books_returns_seeded_books() {
    let app = test_app().await;

    let (status, body) = get(&app, &format!("{}/books", BASE)).await;
    assert_eq!(status, StatusCode::OK);

    let books = body.as_array().expect("Expected an array");
    assert_eq!(books.len(), 7);
    assert_eq!(books[0]["book_id"], 1);
    assert_eq!(books[0]["title"], "Book A");
    assert_eq!(books[0]["genre"], "Genre A");
}

#[tokio::test]
async fn delete_book() {
    let app = test_app().await;

    let (_, _, body) = send(&app, Method::DELETE, &format!("{}/books/1", BASE)).await;
    assert_eq!(body["message"], "Book 1 removed.");

    let (_, body) = get(&app, &format!("{}/books", BASE)).await;
    let books = body.as_array().expect("Expected an array");
    assert_eq!(books.len(), 6);
    for book in books {
        assert_ne!(book["book_id"], 1);
    }
}

#[tokio::test]
async fn delete_book_does_not_exist() {
    let app = test_app().await;

    let (status, _, body) = send(&app, Method::DELETE, &format!("{}/books/999", BASE)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Book 999 does not exist.");
}

#[tokio::test]
async fn delete_book_cascades_to_checkout() {
    let app = test_app().await;

    let (status, _, body) = post(&app, &format!("{}/users/1/checkout/1", BASE)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["due_date"].is_string());

    let (_, body) = get(&app, &format!("{}/checkouts", BASE)).await;
    assert_eq!(body[0]["book_id"], 1);
    assert_eq!(body[0]["user_id"], 1);

    let (status, _, _) = send(&app, Method::DELETE, &format!("{}/books/1", BASE)).await;
    assert_eq!(status, StatusCode::OK);

    // No orphan checkout remains
    let (_, body) = get(&app, &format!("{}/checkouts", BASE)).await;
    assert_eq!(body, Value::Array(vec![]));
    let (_, body) = get(&app, &format!("{}/users/1", BASE)).await;
    assert_eq!(body["books_checked_out"], 0);
}

#[tokio::test]
async fn returned_book_can_be_checked_out_again() {
    let app = test_app().await;

    post(&app, &format!("{}/users/1/checkout/1", BASE)).await;
    post(&app, &format!("{}/users/1/return/1", BASE)).await;

    let (status, _, _) = post(&app, &format!("{}/users/2/checkout/1", BASE)).await;
    assert_eq!(status, StatusCode::CREATED);
}
