//! User and checkout-workflow endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        checkout::UserCheckout,
        user::{UserDetail, UserSummary},
    },
};

use super::MessageResponse;

/// Query parameters of the checkout operation
#[derive(Deserialize, utoipa::IntoParams)]
pub struct CheckoutQuery {
    /// Requested loan length in days. Accepted for compatibility; the due
    /// date is always computed from the fixed loan period.
    pub days: Option<i64>,
}

/// Successful checkout body
#[derive(Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub due_date: DateTime<Utc>,
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "List of user summaries", body = Vec<UserSummary>)
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<UserSummary>>> {
    let users = state.services.library.list_users().await?;
    Ok(Json(users))
}

/// Get user details by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = UserDetail),
        (status = 400, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserDetail>> {
    let user = state.services.library.get_user(id).await?;
    Ok(Json(user))
}

/// Get the books checked out by a user
#[utoipa::path(
    get,
    path = "/users/{id}/checkouts",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User's checkouts", body = Vec<UserCheckout>),
        (status = 400, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn user_checkouts(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<UserCheckout>>> {
    let checkouts = state.services.library.list_user_checkouts(id).await?;
    Ok(Json(checkouts))
}

/// Check a book out to a user
#[utoipa::path(
    post,
    path = "/users/{id}/checkout/{book_id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User ID"),
        ("book_id" = i64, Path, description = "Book ID"),
        CheckoutQuery
    ),
    responses(
        (status = 201, description = "Checkout created", body = CheckoutResponse,
         headers(("Location" = String, description = "The user's checkout list"))),
        (status = 400, description = "User or book not found, limit reached, or book already checked out",
         body = crate::error::ErrorResponse)
    )
)]
pub async fn checkout_book(
    State(state): State<crate::AppState>,
    Path((user_id, book_id)): Path<(i64, i64)>,
    Query(query): Query<CheckoutQuery>,
) -> AppResult<(StatusCode, HeaderMap, Json<CheckoutResponse>)> {
    let due_date = state
        .services
        .library
        .checkout_book(user_id, book_id, query.days)
        .await?;

    Ok((
        StatusCode::CREATED,
        checkouts_location(&state, user_id)?,
        Json(CheckoutResponse { due_date }),
    ))
}

/// Return a book checked out by a user
#[utoipa::path(
    post,
    path = "/users/{id}/return/{book_id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User ID"),
        ("book_id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = MessageResponse,
         headers(("Location" = String, description = "The user's checkout list"))),
        (status = 400, description = "User not found or book not checked out by this user",
         body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path((user_id, book_id)): Path<(i64, i64)>,
) -> AppResult<(HeaderMap, Json<MessageResponse>)> {
    state.services.library.return_book(user_id, book_id).await?;

    Ok((
        checkouts_location(&state, user_id)?,
        Json(MessageResponse {
            message: "success".to_string(),
        }),
    ))
}

/// `Location` header pointing at the user's checkout list
fn checkouts_location(state: &crate::AppState, user_id: i64) -> AppResult<HeaderMap> {
    let location = format!("{}/users/{}/checkouts", state.config.base_path(), user_id);
    let value = HeaderValue::from_str(&location)
        .map_err(|e| AppError::Internal(format!("Invalid Location header: {}", e)))?;

    let mut headers = HeaderMap::new();
    headers.insert(header::LOCATION, value);
    Ok(headers)
}
