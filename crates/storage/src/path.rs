//! Path validation for paths relative to a mount point.
//!
//! Device paths are re-rooted onto a local directory when the reader is
//! mounted on another machine; the mount-relative part must never climb out
//! of that directory.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Validates a mount-relative path and returns it in normalized form.
///
/// `..` components are resolved lexically and may not leave the mount root,
/// null bytes are rejected, and a path that normalizes to nothing (the mount
/// root itself) is rejected because it can never name an ePub file.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use pbfix_storage::validate_path;
/// assert!(validate_path("Books/Dune.epub").is_ok());
/// assert!(validate_path("../system/explorer-3/explorer-3.db").is_err());
/// assert!(validate_path("Books\0.epub").is_err());
/// assert_eq!(
///     validate_path("Books/./Sci-Fi/../Dune.epub").unwrap(),
///     Path::new("Books/Dune.epub")
/// );
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(s) => {
                // Null bytes pass through Path::components() on Unix but cause
                // truncation in C-based syscalls.
                if s.as_encoded_bytes().contains(&0) {
                    exn::bail!(ErrorKind::InvalidPath(path.to_path_buf()));
                }
                components.push(s)
            },
            Component::CurDir | Component::RootDir => {},
            Component::Prefix(_) => exn::bail!(ErrorKind::InvalidPath(path.to_path_buf())),
            Component::ParentDir => {
                if components.pop().is_none() {
                    exn::bail!(ErrorKind::InvalidPath(path.to_path_buf()));
                }
            },
        }
    }
    match components.is_empty() {
        true => exn::bail!(ErrorKind::InvalidPath(path.to_path_buf())),
        false => Ok(components.into_iter().collect()),
    }
}
