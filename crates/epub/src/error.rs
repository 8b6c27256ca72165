//! ePub Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An ePub reading error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for ePub reading operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file is not a (readable) zip archive.
    #[display("not a readable ePub archive")]
    Archive,
    /// A file the ePub layout requires is absent from the archive.
    #[display("missing archive entry: {_0}")]
    MissingEntry(#[error(not(source))] String),
    /// An XML document inside the archive could not be parsed.
    #[display("malformed XML in {_0}")]
    MalformedXml(#[error(not(source))] String),
    /// A required element is absent from an otherwise well-formed document.
    #[display("missing required element: {_0}")]
    MissingElement(#[error(not(source))] &'static str),
}
