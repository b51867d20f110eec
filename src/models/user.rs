//! User model and related types

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// User row from the database
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub book_limit: i64,
}

/// One entry of the user listing
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserSummary {
    pub book_limit: i64,
    pub books_checked_out: i64,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    /// Reference path to the user resource, e.g. `/users/1`
    pub uri: String,
}

/// Full user detail including current checkouts
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserDetail {
    pub book_limit: i64,
    pub books_checked_out: i64,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub checkouts: Vec<CheckoutRef>,
}

/// Reference to a checkout as embedded in the user detail
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CheckoutRef {
    pub book_id: i64,
    pub due_date: DateTime<Utc>,
}
