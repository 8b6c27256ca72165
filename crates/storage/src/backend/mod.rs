//! Storage backend trait and implementations.
//!
//! Paths handed to a backend are *device* paths, exactly as composed from
//! the library database (`folders.name` joined with `files.filename`).
//! Backends decide how such a path maps onto something readable.

mod local;
#[cfg(feature = "mock")]
mod mock;

pub use self::local::LocalBackend;
#[cfg(feature = "mock")]
pub use self::mock::MockBackend;
use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Read access to the ePub files referenced by the library database.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use pbfix_storage::{backend::StorageBackend, error::Result};
///
/// async fn size_of_book(backend: &dyn StorageBackend) -> Result<u64> {
///     let path = Path::new("/mnt/ext1/Books/Dune.epub");
///     if backend.exists(path).await? {
///         let data = backend.read(path).await?;
///         Ok(data.len() as u64)
///     } else {
///         Ok(0)
///     }
/// }
/// ```
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Name of the configured backend, used for logging only.
    fn name(&self) -> &str;

    /// Check if a file exists.
    ///
    /// A path that cannot be mapped by the backend is an error, not a
    /// `false`; callers that only care about "can I read this" should treat
    /// both the same.
    async fn exists(&self, path: &Path) -> Result<bool>;

    /// Read file contents.
    ///
    /// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if the file
    /// does not exist.
    async fn read(&self, path: &Path) -> Result<Vec<u8>>;
}
