//! Book endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, models::book::BookSummary};

use super::MessageResponse;

/// List all books in the library
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "List of book summaries", body = Vec<BookSummary>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BookSummary>>> {
    let books = state.services.library.list_books().await?;
    Ok(Json(books))
}

/// Delete a book, cascading to its checkout if one exists
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book removed", body = MessageResponse),
        (status = 400, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.library.delete_book(id).await?;

    Ok(Json(MessageResponse {
        message: format!("Book {} removed.", id),
    }))
}
