//! Pruning books that vanished from both device and cloud.

use crate::error::{ErrorKind, Result};
use crate::prompt::Prompt;
use exn::ResultExt;
use pbfix_explorer::Repository;
use tracing::{info, instrument};

/// Remove orphaned books (and their dependent rows) after confirmation.
///
/// Returns the number of books deleted: `0` when there were none or the
/// user declined. Nothing is asked when there is nothing to delete.
#[instrument(skip_all)]
pub async fn sweep(repository: &Repository, prompt: &dyn Prompt) -> Result<u64> {
    let orphans = repository.list_orphaned_books().await.or_raise(|| ErrorKind::Database)?;
    for book in &orphans {
        info!(id = book.id, title = %book.title, "Found deleted book");
    }
    if orphans.is_empty() {
        return Ok(0);
    }
    let question = format!(
        "Number of books deleted from Device and Cloud: {}\n\nRemove them from the database?",
        orphans.len()
    );
    if !prompt.confirm(&question).await {
        info!("Keeping deleted books in the database");
        return Ok(0);
    }
    let removal = repository.delete_orphaned_books().await.or_raise(|| ErrorKind::Database)?;
    info!(books = removal.books, "Book entries removed");
    Ok(removal.books)
}
