//! Access to the PocketBook library database (`explorer-3.db`).
//!
//! The database belongs to the device software: it is never created or
//! migrated here, and only a handful of columns are ever written.
//!
//! # Tables
//! - `books_impl`: one row per book, carrying the author sort name and the
//!   series title/position shown by the library view.
//! - `files` and `folders`: where the book's file lives. A book without a
//!   `files` row has vanished from both device and cloud.
//! - [`DEPENDENT_TABLES`]: per-book data (reading positions, shelves, genres,
//!   ...) keyed by book id, cleaned up together with the books.

mod db;
pub mod error;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
pub mod models;
mod repo;

pub use crate::db::Database;
pub use crate::repo::{DEPENDENT_TABLES, DependentTable, Removal, Repository};
