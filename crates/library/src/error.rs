//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of a reconciliation failure.
///
/// ### Per-book Errors
/// - [`ErrorKind::Storage`]
/// - [`ErrorKind::Package`]
///
/// ### Run-aborting Errors
/// - [`ErrorKind::Database`]
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// A query, update or transaction via [`pbfix_explorer::Repository`] failed.
    #[display("library database error")]
    Database,
    /// The book's file could not be read from the storage backend.
    #[display("could not read book file")]
    Storage,
    /// The book's package document could not be parsed.
    #[display("could not parse ePub package")]
    Package,
}

impl ErrorKind {
    /// Returns `true` if the run can continue with the next book.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Storage | Self::Package => true,
            Self::Database => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorKind::Storage, true)]
    #[case(ErrorKind::Package, true)]
    #[case(ErrorKind::Database, false)]
    fn test_is_recoverable(#[case] kind: ErrorKind, #[case] expected: bool) {
        assert_eq!(kind.is_recoverable(), expected);
    }
}
