//! Reconciling a PocketBook library database with the ePub files it lists.
//!
//! A run first [sweeps](sweep()) book records whose file is gone from both
//! device and cloud, then [scans](scan()) the remaining ePub-backed records
//! and corrects the stored first-author sort name and series from each
//! book's package metadata.

pub mod error;
pub mod prompt;
mod reconcile;
pub mod refine;
mod report;
mod scan;
mod sweep;

pub use crate::prompt::{Icon, Prompt, PromptHandle};
pub use crate::reconcile::{AuthorFix, SeriesFix, reconcile_author, reconcile_series};
pub use crate::report::Summary;
pub use crate::scan::{BookOutcome, scan, scan_book};
pub use crate::sweep::sweep;

use crate::error::Result;
use pbfix_explorer::Repository;
use pbfix_storage::BackendHandle;
use tracing::{info, instrument};

/// Run the sweep and then the scan, returning the totals.
///
/// Only database failures are errors; everything else is counted.
#[instrument(skip_all, fields(dry_run = repository.is_dry_run()))]
pub async fn fix(repository: &Repository, backend: &BackendHandle, prompt: &dyn Prompt) -> Result<Summary> {
    let books_deleted = sweep(repository, prompt).await?;
    let summary = Summary { books_deleted, ..scan(repository, backend).await? };
    info!(
        authors_fixed = summary.authors_fixed,
        series_fixed = summary.series_fixed,
        books_deleted = summary.books_deleted,
        errors = summary.errors,
        "Done."
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::testing::ScriptedPrompt;
    use pbfix_epub::fixtures::EpubBuilder;
    use pbfix_explorer::Database;
    use pbfix_explorer::fixtures::Seed;
    use pbfix_storage::backend::MockBackend;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_fix_full_run() {
        let db = Database::connect_in_memory().await.unwrap();
        let seed = Seed::new(&db);
        seed.folder(1, "/mnt/ext1/Books").await;
        seed.book_with(1, "Dune", "Frank Herbert", "", 0).await;
        seed.file(1, 1, "Dune.epub", "epub").await;
        seed.book(2, "Gone").await;
        seed.dependent("bookshelfs_books", "bookid", 2).await;
        let epub = EpubBuilder::new()
            .creator("aut", "", "Frank Herbert")
            .meta("", "#aut", "file-as", "Herbert, Frank")
            .series("c01", "Dune Chronicles", "1")
            .build();
        let backend: BackendHandle = Arc::new(MockBackend::with_files([("/mnt/ext1/Books/Dune.epub", epub)]));
        let prompt = ScriptedPrompt::new([Some(1)]);
        let repository = Repository::from(&db);

        let summary = fix(&repository, &backend, &prompt).await.unwrap();
        assert_eq!(summary, Summary { authors_fixed: 1, series_fixed: 1, books_deleted: 1, errors: 0 });
        assert_eq!(seed.count("bookshelfs_books").await, 0);

        // Nothing left to fix, and no orphan left to ask about.
        let summary = fix(&repository, &backend, &prompt).await.unwrap();
        assert!(summary.is_clean());
        assert_eq!(prompt.asked().len(), 1);
    }

    #[tokio::test]
    async fn test_fix_dry_run() {
        let db = Database::connect_in_memory().await.unwrap();
        let seed = Seed::new(&db);
        seed.book(1, "Gone").await;
        let backend: BackendHandle = Arc::new(MockBackend::default());
        let prompt = ScriptedPrompt::new([Some(1)]);
        let repository = Repository::new(db.pool().clone(), true);

        let summary = fix(&repository, &backend, &prompt).await.unwrap();
        assert_eq!(summary.books_deleted, 1);
        assert_eq!(seed.count("books_impl").await, 1);
    }
}
