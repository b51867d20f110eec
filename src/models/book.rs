//! Book model and related types

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book row from the database
#[derive(Debug, Clone, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub genre: String,
}

/// One entry of the book listing
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BookSummary {
    pub book_id: i64,
    pub genre: String,
    pub title: String,
}
