//! Seeding helpers for an in-memory library database.
//!
//! Everything in here panics instead of returning errors: a fixture that
//! cannot be inserted is a broken test, not a runtime condition.

use crate::Database;
use sqlx::SqlitePool;

/// Inserts rows into a database created by [`Database::connect_in_memory`].
#[derive(Debug, Clone)]
pub struct Seed {
    pool: SqlitePool,
}
impl Seed {
    pub fn new(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }

    pub async fn folder(&self, id: i64, name: &str) {
        sqlx::query("INSERT INTO folders (id, name) VALUES (?, ?)")
            .bind(id)
            .bind(name)
            .execute(&self.pool)
            .await
            .expect("insert folder");
    }

    /// A book row with only its title set; every other column is NULL.
    pub async fn book(&self, id: i64, title: &str) {
        sqlx::query("INSERT INTO books_impl (id, title) VALUES (?, ?)")
            .bind(id)
            .bind(title)
            .execute(&self.pool)
            .await
            .expect("insert book");
    }

    /// A book row with author and series columns set.
    pub async fn book_with(&self, id: i64, title: &str, first_author: &str, series: &str, number_in_series: i32) {
        sqlx::query(
            "INSERT INTO books_impl (id, title, firstauthor, series, numinseries, sort_title) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(title)
        .bind(first_author)
        .bind(series)
        .bind(number_in_series)
        .bind(title)
        .execute(&self.pool)
        .await
        .expect("insert book");
    }

    /// A `files` row for `book_id`; the row id is the book id.
    pub async fn file(&self, book_id: i64, folder_id: i64, filename: &str, ext: &str) {
        sqlx::query("INSERT INTO files (id, book_id, folder_id, filename, ext) VALUES (?, ?, ?, ?, ?)")
            .bind(book_id)
            .bind(book_id)
            .bind(folder_id)
            .bind(filename)
            .bind(ext)
            .execute(&self.pool)
            .await
            .expect("insert file");
    }

    /// A row in one of the dependent tables, with only its book id set.
    pub async fn dependent(&self, table: &str, column: &str, book_id: i64) {
        sqlx::query(&format!("INSERT INTO {table} ({column}) VALUES (?)"))
            .bind(book_id)
            .execute(&self.pool)
            .await
            .expect("insert dependent row");
    }

    /// `(firstauthor, first_author_letter, series, numinseries)` of a book.
    pub async fn columns(&self, id: i64) -> (Option<String>, Option<String>, Option<String>, Option<i32>) {
        sqlx::query_as("SELECT firstauthor, first_author_letter, series, numinseries FROM books_impl WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .expect("select book columns")
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .expect("count rows")
    }
}
