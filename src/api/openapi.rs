//! OpenAPI documentation

use axum::{routing::get, Json, Router};
use utoipa::openapi::Server;
use utoipa::OpenApi;

use crate::api::{books, checkouts, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library API",
        version = "0.1.0",
        description = "Library record service REST API: users, books and checkouts"
    ),
    paths(
        // Health
        health::health_check,
        // Users
        users::list_users,
        users::get_user,
        users::user_checkouts,
        users::checkout_book,
        users::return_book,
        // Books
        books::list_books,
        books::delete_book,
        // Checkouts
        checkouts::list_checkouts,
    ),
    components(
        schemas(
            // Users
            crate::models::user::UserSummary,
            crate::models::user::UserDetail,
            crate::models::user::CheckoutRef,
            // Books
            crate::models::book::BookSummary,
            // Checkouts
            crate::models::checkout::UserCheckout,
            crate::models::checkout::CheckoutDetails,
            users::CheckoutResponse,
            // Shared
            super::MessageResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "Users and the checkout/return workflow"),
        (name = "books", description = "Book catalog"),
        (name = "checkouts", description = "Global checkout listing")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router.
///
/// The server url of the document follows the configured base path.
pub fn router(base_path: &str) -> Router {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(base_path)]);

    Router::new().route(
        "/api-docs/openapi.json",
        get(move || {
            let doc = doc.clone();
            async move { Json(doc) }
        }),
    )
}
