//! Repository for the handful of `explorer-3.db` operations the fixer needs.
//!
//! Reads are always fully drained before returning, so that no cursor is
//! left open on the single pooled connection when the caller starts writing.

use crate::Database;
use crate::error::{ErrorKind, Result};
use crate::models::{BookRecord, BookRow, OrphanedBook, OrphanedBookRow};
use exn::ResultExt;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

/// A table holding per-book data keyed by a book id column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependentTable {
    pub name: &'static str,
    /// Column referencing `books_impl.id`.
    pub column: &'static str,
}

/// Tables cleaned after orphaned books are deleted, in cleanup order.
pub const DEPENDENT_TABLES: [DependentTable; 5] = [
    DependentTable { name: "books_settings", column: "bookid" },
    DependentTable { name: "books_uids", column: "book_id" },
    DependentTable { name: "bookshelfs_books", column: "bookid" },
    DependentTable { name: "booktogenre", column: "bookid" },
    DependentTable { name: "social", column: "bookid" },
];

/// Rows removed by [`Repository::delete_orphaned_books`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Removal {
    /// Number of `books_impl` rows deleted.
    pub books: u64,
    /// Rows deleted per dependent table, in [`DEPENDENT_TABLES`] order.
    pub dependents: Vec<(&'static str, u64)>,
}

/// Repository for book records in the library database.
///
/// Book rows are created by the device software only; this repository reads
/// them, corrects author and series columns, and prunes rows whose file has
/// disappeared.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
    dry_run: bool,
}
impl From<&Database> for Repository {
    fn from(db: &Database) -> Self {
        Self { pool: db.pool().clone(), dry_run: false }
    }
}
impl Repository {
    /// Create a new repository with the given connection pool.
    ///
    /// In dry-run mode every write is logged and skipped.
    pub fn new(pool: SqlitePool, dry_run: bool) -> Self {
        Self { pool, dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    // =========================================================================
    // Listing
    // =========================================================================

    /// List books that no longer have any backing file (deleted from both
    /// device and cloud).
    pub async fn list_orphaned_books(&self) -> Result<Vec<OrphanedBook>> {
        let rows: Vec<OrphanedBookRow> = sqlx::query_as(include_str!("../queries/list_orphaned_books.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(rows.into_iter().map(OrphanedBook::from).collect())
    }

    /// List every book backed by an ePub file in a named folder.
    pub async fn list_epub_books(&self) -> Result<Vec<BookRecord>> {
        let rows: Vec<BookRow> = sqlx::query_as(include_str!("../queries/list_epub_books.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(rows.into_iter().map(BookRecord::from).collect())
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Set the first author's sort name and its index letter.
    ///
    /// Returns `true` if a row was updated (always `true` in dry-run mode).
    #[instrument(skip(self))]
    pub async fn update_first_author(&self, id: i64, first_author: &str, first_letter: &str) -> Result<bool> {
        if self.dry_run {
            debug!("dry run, skipping update");
            return Ok(true);
        }
        let result = sqlx::query(include_str!("../queries/update_first_author.sql"))
            .bind(first_author)
            .bind(first_letter)
            .bind(id)
            .execute(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the series title and the book's position in it.
    ///
    /// Returns `true` if a row was updated (always `true` in dry-run mode).
    #[instrument(skip(self))]
    pub async fn update_series(&self, id: i64, series: &str, number_in_series: i32) -> Result<bool> {
        if self.dry_run {
            debug!("dry run, skipping update");
            return Ok(true);
        }
        let result = sqlx::query(include_str!("../queries/update_series.sql"))
            .bind(series)
            .bind(number_in_series)
            .bind(id)
            .execute(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Delete all orphaned books and then every dependent row that no longer
    /// references a surviving book, in a single transaction.
    ///
    /// In dry-run mode nothing is written and the number of orphaned books
    /// is reported instead.
    #[instrument(skip(self))]
    pub async fn delete_orphaned_books(&self) -> Result<Removal> {
        if self.dry_run {
            let books = self.list_orphaned_books().await?.len() as u64;
            debug!(books, "dry run, skipping deletion");
            return Ok(Removal { books, dependents: Vec::new() });
        }
        let mut tx = self.pool.begin().await.or_raise(|| ErrorKind::Database)?;
        let books = sqlx::query(include_str!("../queries/delete_orphaned_books.sql"))
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?
            .rows_affected();
        info!(books, "deleted orphaned books");
        let mut dependents = Vec::with_capacity(DEPENDENT_TABLES.len());
        for table in DEPENDENT_TABLES {
            // Table and column names come from a fixed list, never from input.
            let statement = format!(
                "DELETE FROM {name} WHERE {column} NOT IN (SELECT id FROM books_impl)",
                name = table.name,
                column = table.column,
            );
            let rows = sqlx::query(&statement)
                .execute(&mut *tx)
                .await
                .or_raise(|| ErrorKind::Database)?
                .rows_affected();
            info!(table = table.name, rows, "deleted dependent rows");
            dependents.push((table.name, rows));
        }
        tx.commit().await.or_raise(|| ErrorKind::Database)?;
        Ok(Removal { books, dependents })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Seed;

    async fn setup() -> (Database, Seed) {
        let db = Database::connect_in_memory().await.unwrap();
        let seed = Seed::new(&db);
        (db, seed)
    }

    #[tokio::test]
    async fn test_list_epub_books() {
        let (db, seed) = setup().await;
        seed.folder(1, "/mnt/ext1/Books").await;
        seed.folder(2, "").await;
        seed.book(1, "Dune").await;
        seed.book(2, "Notes").await;
        seed.book(3, "Nowhere").await;
        seed.book(4, "Orphan").await;
        seed.file(1, 1, "Dune.epub", "epub").await;
        seed.file(2, 1, "Notes.pdf", "pdf").await;
        seed.file(3, 2, "Nowhere.epub", "epub").await;
        let books = Repository::from(&db).list_epub_books().await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, 1);
        assert_eq!(books[0].filename, "Dune.epub");
        // NULL columns come back as defaults.
        assert_eq!(books[0].first_author, "");
        assert_eq!(books[0].series, "");
        assert_eq!(books[0].number_in_series, 0);
    }

    #[tokio::test]
    async fn test_list_orphaned_books() {
        let (db, seed) = setup().await;
        seed.folder(1, "/mnt/ext1").await;
        seed.book(1, "Present").await;
        seed.book(2, "Gone").await;
        seed.file(1, 1, "Present.epub", "epub").await;
        let orphans = Repository::from(&db).list_orphaned_books().await.unwrap();
        assert_eq!(orphans, vec![OrphanedBook { id: 2, title: "Gone".to_string() }]);
    }

    #[tokio::test]
    async fn test_update_first_author() {
        let (db, seed) = setup().await;
        seed.book(7, "Emma").await;
        let repo = Repository::from(&db);
        assert!(repo.update_first_author(7, "Austen, Jane", "A").await.unwrap());
        assert!(!repo.update_first_author(8, "Nobody", "N").await.unwrap());
        let (author, letter): (String, String) =
            sqlx::query_as("SELECT firstauthor, first_author_letter FROM books_impl WHERE id = 7")
                .fetch_one(db.pool())
                .await
                .unwrap();
        assert_eq!(author, "Austen, Jane");
        assert_eq!(letter, "A");
    }

    #[tokio::test]
    async fn test_update_series() {
        let (db, seed) = setup().await;
        seed.book(3, "Dune Messiah").await;
        let repo = Repository::from(&db);
        assert!(repo.update_series(3, "Dune Chronicles", 2).await.unwrap());
        let (series, position): (String, i32) =
            sqlx::query_as("SELECT series, numinseries FROM books_impl WHERE id = 3")
                .fetch_one(db.pool())
                .await
                .unwrap();
        assert_eq!(series, "Dune Chronicles");
        assert_eq!(position, 2);
    }

    #[tokio::test]
    async fn test_delete_orphaned_books_cleans_dependents() {
        let (db, seed) = setup().await;
        seed.folder(1, "/mnt/ext1").await;
        seed.book(1, "Kept").await;
        seed.book(2, "Gone").await;
        seed.file(1, 1, "Kept.epub", "epub").await;
        seed.dependent("booktogenre", "bookid", 1).await;
        seed.dependent("booktogenre", "bookid", 2).await;
        seed.dependent("books_uids", "book_id", 2).await;
        seed.dependent("social", "bookid", 2).await;

        let removal = Repository::from(&db).delete_orphaned_books().await.unwrap();
        assert_eq!(removal.books, 1);
        assert_eq!(
            removal.dependents,
            vec![("books_settings", 0), ("books_uids", 1), ("bookshelfs_books", 0), ("booktogenre", 1), ("social", 1)]
        );
        assert_eq!(seed.count("books_impl").await, 1);
        let genres: Vec<i64> = sqlx::query_scalar("SELECT bookid FROM booktogenre")
            .fetch_all(db.pool())
            .await
            .unwrap();
        assert_eq!(genres, vec![1]);
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let (db, seed) = setup().await;
        seed.book(1, "Gone").await;
        seed.dependent("social", "bookid", 1).await;
        let repo = Repository::new(db.pool().clone(), true);
        assert!(repo.is_dry_run());
        assert!(repo.update_first_author(1, "Doe, Jane", "D").await.unwrap());
        assert!(repo.update_series(1, "Saga", 1).await.unwrap());
        let removal = repo.delete_orphaned_books().await.unwrap();
        assert_eq!(removal, Removal { books: 1, dependents: vec![] });
        assert_eq!(seed.count("books_impl").await, 1);
        assert_eq!(seed.count("social").await, 1);
        let author: Option<String> = sqlx::query_scalar("SELECT firstauthor FROM books_impl WHERE id = 1")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(author, None);
    }

    #[test]
    fn test_dependent_table_order() {
        let names: Vec<_> = DEPENDENT_TABLES.iter().map(|t| t.name).collect();
        assert_eq!(names, ["books_settings", "books_uids", "bookshelfs_books", "booktogenre", "social"]);
    }
}
