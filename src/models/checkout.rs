//! Checkout model and related types
//!
//! A checkout links one book to one user for a bounded loan period. The
//! book id is the primary key of the checkouts table, so a book can have
//! at most one active checkout.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Fixed loan period added to the checkout time to compute the due date.
pub const LOAN_PERIOD_DAYS: i64 = 13;

/// Checkout row from the database
#[derive(Debug, Clone, FromRow)]
pub struct Checkout {
    pub book_id: i64,
    pub user_id: i64,
    pub out_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

/// One entry of a user's checkout listing, carrying the book title
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct UserCheckout {
    pub book_id: i64,
    pub out_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub title: String,
}

/// One entry of the global checkout listing
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CheckoutDetails {
    pub book_id: i64,
    pub due_date: DateTime<Utc>,
    pub out_date: DateTime<Utc>,
    pub title: String,
    pub user_id: i64,
}
