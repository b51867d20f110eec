//! Users repository for database operations

use sqlx::{Pool, Row, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::user::{CheckoutRef, User, UserDetail, UserSummary},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Sqlite>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} does not exist.", id)))
    }

    /// List all users with their active checkout counts, in insertion order
    pub async fn list(&self) -> AppResult<Vec<UserSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT u.id, u.firstname, u.lastname, u.email, u.book_limit,
                   COUNT(c.book_id) AS books_checked_out
            FROM users u
            LEFT JOIN checkouts c ON c.user_id = u.id
            GROUP BY u.id
            ORDER BY u.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| UserSummary {
                book_limit: row.get("book_limit"),
                books_checked_out: row.get("books_checked_out"),
                email: row.get("email"),
                firstname: row.get("firstname"),
                lastname: row.get("lastname"),
                uri: format!("/users/{}", row.get::<i64, _>("id")),
            })
            .collect())
    }

    /// Get user detail including each current checkout
    pub async fn get_detail(&self, id: i64) -> AppResult<UserDetail> {
        let user = self.get_by_id(id).await?;

        let checkouts = sqlx::query_as::<_, CheckoutRef>(
            "SELECT book_id, due_date FROM checkouts WHERE user_id = ? ORDER BY out_date",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(UserDetail {
            book_limit: user.book_limit,
            books_checked_out: checkouts.len() as i64,
            email: user.email,
            firstname: user.firstname,
            lastname: user.lastname,
            checkouts,
        })
    }
}
