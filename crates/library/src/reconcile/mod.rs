//! Deciding which database columns disagree with a book's package metadata.
//!
//! Reconcilers are pure: they compare a [`BookRecord`](pbfix_explorer::models::BookRecord)
//! snapshot against the parsed [`Package`](pbfix_epub::models::Package) and
//! describe the writes to make. Applying them is up to the scanner.

mod author;
mod series;

pub use self::author::{AuthorFix, reconcile_author};
pub use self::series::{SeriesFix, reconcile_series};
