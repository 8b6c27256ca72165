//! Local filesystem storage backend.
//!
//! On the reader itself the device paths stored in the database are real
//! paths. When the reader is mounted elsewhere (USB mass storage), paths
//! under the device's mount point (`/mnt/ext1`) are re-rooted onto the local
//! mount directory instead.

use crate::error::{ErrorKind, Result};
use crate::{StorageBackend, path::validate as validate_path};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Local filesystem storage backend.
///
/// # Examples
///
/// ```no_run
/// use pbfix_storage::backend::LocalBackend;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Running on the device: no re-rooting.
/// let on_device = LocalBackend::new("device", "/mnt/ext1", "/mnt/ext1")?;
/// // Reader mounted on a desktop.
/// let mounted = LocalBackend::new("usb", "/mnt/ext1", "/media/user/PB632")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct LocalBackend {
    name: String,
    /// Where the device software believes its storage lives.
    mount_point: PathBuf,
    /// Where that storage is reachable from this process.
    root: PathBuf,
}
impl LocalBackend {
    /// Create a new local filesystem backend.
    ///
    /// # Errors
    ///
    /// Returns an error if either path is not absolute, or if `root` is not
    /// an existing directory. The root is never created: it is somebody
    /// else's storage.
    pub fn new(name: impl Into<String>, mount_point: impl AsRef<Path>, root: impl AsRef<Path>) -> Result<Self> {
        let mount_point = mount_point.as_ref().to_path_buf();
        let root = root.as_ref().to_path_buf();
        if !mount_point.is_absolute() {
            exn::bail!(ErrorKind::InvalidPath(mount_point));
        }
        if !root.is_absolute() || !root.is_dir() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        let backend = Self { name: name.into(), mount_point, root };
        tracing::debug!(
            name = %backend.name,
            mount_point = %backend.mount_point.display(),
            root = %backend.root.display(),
            "Using local storage"
        );
        Ok(backend)
    }

    fn is_identity(&self) -> bool {
        self.mount_point == self.root
    }

    /// Map a device path onto the local filesystem.
    fn local_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        // On the device, anything goes (the SD card lives at `/mnt/ext2`).
        if self.is_identity() {
            return Ok(path.to_path_buf());
        }
        let Ok(relative) = path.strip_prefix(&self.mount_point) else {
            exn::bail!(ErrorKind::OutsideMount(path.to_path_buf()));
        };
        Ok(self.root.join(validate_path(relative)?))
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }
}

#[async_trait]
impl StorageBackend for LocalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        let local = self.local_path(path)?;
        Ok(fs::try_exists(&local).await.map_err(|e| Self::map_io_error(e, path))?)
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let local = self.local_path(path)?;
        Ok(fs::read(&local).await.map_err(|e| Self::map_io_error(e, path))?)
    }
}
