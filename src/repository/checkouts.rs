//! Checkouts repository for database operations
//!
//! The checkout and return workflows run their precondition reads and the
//! write inside a single transaction, so two concurrent checkouts of the
//! same book cannot both succeed.

use chrono::{DateTime, Duration, Utc};
use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::checkout::{Checkout, CheckoutDetails, UserCheckout, LOAN_PERIOD_DAYS},
};

#[derive(Clone)]
pub struct CheckoutsRepository {
    pool: Pool<Sqlite>,
}

impl CheckoutsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Check a book out to a user.
    ///
    /// Preconditions, first failure wins: the user exists, the user is
    /// under their checkout limit, the book exists, the book is not
    /// already checked out. On success returns the due date.
    pub async fn checkout(&self, user_id: i64, book_id: i64) -> AppResult<DateTime<Utc>> {
        let mut tx = self.pool.begin().await?;

        let book_limit: Option<i64> =
            sqlx::query_scalar("SELECT book_limit FROM users WHERE id = ?")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;
        let book_limit = book_limit
            .ok_or_else(|| AppError::NotFound(format!("User {} does not exist.", user_id)))?;

        let checked_out: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM checkouts WHERE user_id = ?")
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await?;
        if checked_out >= book_limit {
            return Err(AppError::LimitExceeded(format!(
                "User has reached checkout limit of {}",
                book_limit
            )));
        }

        let book_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = ?)")
                .bind(book_id)
                .fetch_one(&mut *tx)
                .await?;
        if !book_exists {
            return Err(AppError::NotFound(format!(
                "Book {} does not exist.",
                book_id
            )));
        }

        let already_out: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM checkouts WHERE book_id = ?)")
                .bind(book_id)
                .fetch_one(&mut *tx)
                .await?;
        if already_out {
            return Err(AppError::AlreadyCheckedOut(format!(
                "Book {} is already checked out.",
                book_id
            )));
        }

        let out_date = Utc::now();
        let due_date = out_date + Duration::days(LOAN_PERIOD_DAYS);

        sqlx::query(
            "INSERT INTO checkouts (book_id, user_id, out_date, due_date) VALUES (?, ?, ?, ?)",
        )
        .bind(book_id)
        .bind(user_id)
        .bind(out_date)
        .bind(due_date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(due_date)
    }

    /// Return a book checked out by a user, deleting the checkout.
    pub async fn return_book(&self, user_id: i64, book_id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let user_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await?;
        if !user_exists {
            return Err(AppError::NotFound(format!(
                "User {} does not exist.",
                user_id
            )));
        }

        let checkout = sqlx::query_as::<_, Checkout>(
            "SELECT * FROM checkouts WHERE book_id = ? AND user_id = ?",
        )
        .bind(book_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "User {} has not checked out Book {}.",
                user_id, book_id
            ))
        })?;

        sqlx::query("DELETE FROM checkouts WHERE book_id = ?")
            .bind(checkout.book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Get the checkouts of one user, with book titles
    pub async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<UserCheckout>> {
        let checkouts = sqlx::query_as::<_, UserCheckout>(
            r#"
            SELECT c.book_id, c.out_date, c.due_date, b.title
            FROM checkouts c
            JOIN books b ON c.book_id = b.id
            WHERE c.user_id = ?
            ORDER BY c.out_date
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(checkouts)
    }

    /// Get all checkouts across all users, sorted ascending by due date
    pub async fn list_all(&self) -> AppResult<Vec<CheckoutDetails>> {
        let checkouts = sqlx::query_as::<_, CheckoutDetails>(
            r#"
            SELECT c.book_id, c.due_date, c.out_date, b.title, c.user_id
            FROM checkouts c
            JOIN books b ON c.book_id = b.id
            ORDER BY c.due_date
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(checkouts)
    }
}
