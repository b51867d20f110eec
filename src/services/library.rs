//! Library record service
//!
//! Thin orchestration over the repositories: entity validation happens
//! here when an operation spans entities, the state transitions themselves
//! live in the repository layer.

use chrono::{DateTime, Utc};

use crate::{
    error::AppResult,
    models::{
        book::BookSummary,
        checkout::{CheckoutDetails, UserCheckout},
        user::{UserDetail, UserSummary},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LibraryService {
    repository: Repository,
}

impl LibraryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all users with their active checkout counts
    pub async fn list_users(&self) -> AppResult<Vec<UserSummary>> {
        self.repository.users.list().await
    }

    /// Get full user detail by ID
    pub async fn get_user(&self, user_id: i64) -> AppResult<UserDetail> {
        self.repository.users.get_detail(user_id).await
    }

    /// Get the checkouts of one user
    pub async fn list_user_checkouts(&self, user_id: i64) -> AppResult<Vec<UserCheckout>> {
        // Verify user exists
        self.repository.users.get_by_id(user_id).await?;
        self.repository.checkouts.list_for_user(user_id).await
    }

    /// Check a book out to a user, returning the due date.
    ///
    /// `days` is accepted for wire compatibility but the due date always
    /// uses the fixed loan period, as in the service this replaces.
    pub async fn checkout_book(
        &self,
        user_id: i64,
        book_id: i64,
        _days: Option<i64>,
    ) -> AppResult<DateTime<Utc>> {
        self.repository.checkouts.checkout(user_id, book_id).await
    }

    /// Return a book checked out by a user
    pub async fn return_book(&self, user_id: i64, book_id: i64) -> AppResult<()> {
        self.repository.checkouts.return_book(user_id, book_id).await
    }

    /// List all books
    pub async fn list_books(&self) -> AppResult<Vec<BookSummary>> {
        self.repository.books.list().await
    }

    /// Delete a book and its checkout, if any
    pub async fn delete_book(&self, book_id: i64) -> AppResult<()> {
        self.repository.books.delete(book_id).await
    }

    /// List all checkouts, sorted ascending by due date
    pub async fn list_checkouts(&self) -> AppResult<Vec<CheckoutDetails>> {
        self.repository.checkouts.list_all().await
    }
}
