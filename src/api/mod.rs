//! API handlers for the library REST endpoints

pub mod books;
pub mod checkouts;
pub mod health;
pub mod openapi;
pub mod users;

use axum::{
    routing::{delete, get, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::AppState;

/// Confirmation body for mutations that return only a message
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Build the application router, with all API routes nested under the
/// configured base path (default `/library/v1`).
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(health::health_check))
        .route("/users", get(users::list_users))
        .route("/users/:id", get(users::get_user))
        .route("/users/:id/checkouts", get(users::user_checkouts))
        .route("/users/:id/checkout/:book_id", post(users::checkout_book))
        .route("/users/:id/return/:book_id", post(users::return_book))
        .route("/books", get(books::list_books))
        .route("/books/:id", delete(books::delete_book))
        .route("/checkouts", get(checkouts::list_checkouts))
        .with_state(state.clone());

    let base_path = state.config.base_path();

    Router::new()
        .nest(&base_path, api)
        .merge(openapi::router(&base_path))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
