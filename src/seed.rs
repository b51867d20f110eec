//! Development fixture data
//!
//! Seed users and books for development and test environments. Loaded from
//! `main` behind the `database.seed` flag; checkout state is never seeded.
//! Rows carry fixed ids so reloading against an existing store is a no-op.

use sqlx::{Pool, Sqlite};

use crate::error::AppResult;

const USERS: [(i64, &str, &str, &str); 4] = [
    (1, "J.P.", "Hutchins", "jphutchins@gmail.com"),
    (2, "A", "AA", "A@AA.com"),
    (3, "B", "BB", "B@BB.com"),
    (4, "C", "CC", "C@CC.com"),
];

const BOOKS: [(i64, &str, &str); 7] = [
    (1, "Book A", "Genre A"),
    (2, "Book B", "Genre B"),
    (3, "Book C", "Genre C"),
    (4, "Book D", "Genre A"),
    (5, "Book E", "Genre A"),
    (6, "Book F", "Genre B"),
    (7, "Book G", "Genre A"),
];

/// Insert the fixture users and books
pub async fn load(pool: &Pool<Sqlite>) -> AppResult<()> {
    for (id, firstname, lastname, email) in USERS {
        sqlx::query(
            "INSERT INTO users (id, firstname, lastname, email) VALUES (?, ?, ?, ?) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(id)
        .bind(firstname)
        .bind(lastname)
        .bind(email)
        .execute(pool)
        .await?;
    }

    for (id, title, genre) in BOOKS {
        sqlx::query(
            "INSERT INTO books (id, title, genre) VALUES (?, ?, ?) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(id)
        .bind(title)
        .bind(genre)
        .execute(pool)
        .await?;
    }

    Ok(())
}
