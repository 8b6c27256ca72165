//! Storage access for the ePub files referenced by the library database.
//!
//! The library database records every book as a device path (folder name plus
//! filename, e.g. `/mnt/ext1/Books/Some Title.epub`). A [`StorageBackend`]
//! answers the only two questions the fixer asks about those paths: does the
//! file exist, and what are its bytes.

pub mod backend;
pub mod error;
mod path;

pub use crate::backend::StorageBackend;
pub use crate::path::validate as validate_path;
use std::sync::Arc;

pub type BackendHandle = Arc<dyn StorageBackend + Send + Sync>;
