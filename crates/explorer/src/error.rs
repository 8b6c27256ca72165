//! Library Database Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A library database error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library database operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("database error")]
    Database,
    /// The database file does not exist; it is never created.
    #[display("database not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
}
