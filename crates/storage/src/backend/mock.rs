//! Storage backend holding ePub files in memory.

use crate::StorageBackend;
use crate::error::{ErrorKind, Result};
use crate::path::validate as validate_path;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::io::Error as IoError;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Device storage faked in memory, for tests.
///
/// Books are keyed by their normalized device path.
///
/// ```
/// use pbfix_storage::backend::{MockBackend, StorageBackend};
/// use std::path::Path;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = MockBackend::with_files([("/mnt/ext1/Books/Dune.epub", b"PK...")]);
/// assert!(backend.exists(Path::new("/mnt/ext1/Books/Dune.epub")).await?);
/// assert!(!backend.exists(Path::new("/mnt/ext1/Books/Emma.epub")).await?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MockBackend {
    books: RwLock<HashMap<PathBuf, Vec<u8>>>,
    unreadable: HashSet<PathBuf>,
}

impl MockBackend {
    /// Panics on an invalid device path: the test itself is broken.
    pub fn with_files(files: impl IntoIterator<Item = (impl Into<PathBuf>, impl Into<Vec<u8>>)>) -> Self {
        let books = files.into_iter().map(|(path, data)| (Self::key(path.into()), data.into())).collect();
        Self { books: RwLock::new(books), unreadable: HashSet::new() }
    }

    /// Mark a file as present but failing every read, like a flaky SD card.
    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        self.unreadable.insert(Self::key(path.into()));
        self
    }

    /// Add or replace a book after construction.
    pub async fn insert(&self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        self.books.write().await.insert(Self::key(path.into()), data.into());
    }

    fn key(path: PathBuf) -> PathBuf {
        match validate_path(&path) {
            Ok(key) => key,
            Err(_) => panic!("MockBackend: invalid path {}", path.display()),
        }
    }
}

#[async_trait]
impl StorageBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        let key = validate_path(path)?;
        Ok(self.unreadable.contains(&key) || self.books.read().await.contains_key(&key))
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let key = validate_path(path)?;
        if self.unreadable.contains(&key) {
            exn::bail!(ErrorKind::Io(IoError::other("simulated read failure")));
        }
        match self.books.read().await.get(&key) {
            Some(data) => Ok(data.clone()),
            None => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
        }
    }
}
