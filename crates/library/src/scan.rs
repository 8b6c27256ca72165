//! Walking the ePub-backed book records and applying corrections.

use crate::error::{ErrorKind, Result};
use crate::reconcile::{reconcile_author, reconcile_series};
use crate::refine::Refinements;
use crate::report::Summary;
use exn::ResultExt;
use pbfix_epub::models::Package;
use pbfix_explorer::Repository;
use pbfix_explorer::models::BookRecord;
use pbfix_storage::BackendHandle;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// What happened to a single book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookOutcome {
    pub author_fixed: bool,
    /// Number of series writes issued.
    pub series_fixed: u64,
    /// The book's file could not be read or parsed.
    pub error: bool,
}

/// Reconcile every ePub-backed book record with its package metadata.
///
/// All records are read before the first write. Books whose file is missing
/// are skipped; unreadable books are logged and counted in
/// [`Summary::errors`]. Only database failures end the scan early.
#[instrument(skip_all, fields(backend = backend.name()))]
pub async fn scan(repository: &Repository, backend: &BackendHandle) -> Result<Summary> {
    let records = repository.list_epub_books().await.or_raise(|| ErrorKind::Database)?;
    debug!(books = records.len(), "Listed ePub books");
    let mut summary = Summary::default();
    for record in &records {
        let outcome = scan_book(repository, backend, record).await?;
        summary.authors_fixed += u64::from(outcome.author_fixed);
        summary.series_fixed += outcome.series_fixed;
        summary.errors += u64::from(outcome.error);
    }
    Ok(summary)
}

/// Reconcile a single book record and write any corrections.
pub async fn scan_book(repository: &Repository, backend: &BackendHandle, record: &BookRecord) -> Result<BookOutcome> {
    let path = record.file_path();
    match backend.exists(&path).await {
        Ok(true) => {},
        Ok(false) => {
            debug!(id = record.id, path = %path.display(), "Book file not on storage; skipping");
            return Ok(BookOutcome::default());
        },
        Err(err) => {
            debug!(id = record.id, path = %path.display(), error = ?err, "Could not check book file; skipping");
            return Ok(BookOutcome::default());
        },
    }
    let package = match read_package(backend, &path).await {
        Ok(package) => package,
        Err(err) if err.is_recoverable() => {
            warn!(id = record.id, path = %path.display(), error = ?err, "Could not read book");
            return Ok(BookOutcome { error: true, ..BookOutcome::default() });
        },
        Err(err) => return Err(err),
    };

    let refinements = Refinements::new(&package.metas);
    let mut outcome = BookOutcome::default();
    if let Some(fix) = reconcile_author(record, &package, &refinements) {
        info!(id = record.id, path = %path.display(), first_author = %fix.first_author, "Fixing Author");
        repository
            .update_first_author(record.id, &fix.first_author, &fix.first_letter)
            .await
            .or_raise(|| ErrorKind::Database)?;
        outcome.author_fixed = true;
    }
    for fix in reconcile_series(record, &package, &refinements) {
        info!(
            id = record.id,
            path = %path.display(),
            series = %fix.series,
            number_in_series = fix.number_in_series,
            "Fixing Series"
        );
        repository
            .update_series(record.id, &fix.series, fix.number_in_series)
            .await
            .or_raise(|| ErrorKind::Database)?;
        outcome.series_fixed += 1;
    }
    Ok(outcome)
}

async fn read_package(backend: &BackendHandle, path: &Path) -> Result<Package> {
    // The whole archive is held in memory; ePubs are small enough for that.
    let bytes = backend.read(path).await.or_raise(|| ErrorKind::Storage)?;
    pbfix_epub::read_package(bytes).or_raise(|| ErrorKind::Package)
}
