//! Layered configuration for pbfix.
//!
//! Layers, lowest priority first:
//!
//! 1. Built-in defaults, matching a PocketBook device's layout.
//! 2. A TOML file: the one given explicitly, else `pbfix.toml` in the
//!    platform configuration directory (if it exists).
//! 3. `PBFIX_` environment variables, with `__` separating nested keys
//!    (e.g. `PBFIX_DEVICE__ROOT=/media/reader`).
//! 4. Command-line [`Overrides`].
//!
//! ```toml
//! database = "/media/reader/system/explorer-3/explorer-3.db"
//! log_file = "/tmp/PBibFix.log"
//! dry_run = true
//!
//! [device]
//! mount_point = "/mnt/ext1"
//! root = "/media/reader"
//!
//! [dialog]
//! enabled = false
//! ```

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const ENV_PREFIX: &str = "PBFIX_";
pub const FILE_NAME: &str = "pbfix.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Location of the library database (`explorer-3.db`).
    pub database: PathBuf,
    /// Where the run's log is written.
    pub log_file: PathBuf,
    /// Log and count fixes without writing to the database.
    pub dry_run: bool,
    pub device: DeviceConfig,
    pub dialog: DialogConfig,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("/mnt/ext1/system/explorer-3/explorer-3.db"),
            log_file: PathBuf::from("/mnt/ext1/PBibFix.log"),
            dry_run: false,
            device: DeviceConfig::default(),
            dialog: DialogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Prefix of the book paths recorded in the library database.
    pub mount_point: PathBuf,
    /// Where the mount point is reachable from this machine. Unset when
    /// running on the device itself.
    pub root: Option<PathBuf>,
}
impl Default for DeviceConfig {
    fn default() -> Self {
        Self { mount_point: PathBuf::from("/mnt/ext1"), root: None }
    }
}
impl DeviceConfig {
    /// The local directory that [`mount_point`](Self::mount_point) maps to.
    pub fn local_root(&self) -> &Path {
        self.root.as_deref().unwrap_or(&self.mount_point)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    /// The firmware's dialog utility.
    pub program: PathBuf,
    /// Use the dialog utility; when disabled, the terminal is used instead.
    pub enabled: bool,
}
impl Default for DialogConfig {
    fn default() -> Self {
        Self { program: PathBuf::from("/ebrmain/bin/dialog"), enabled: true }
    }
}

/// Settings given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub dry_run: Option<bool>,
    pub dialog_enabled: Option<bool>,
}

impl Config {
    /// Load and validate the configuration.
    ///
    /// An explicitly given `file` must exist; the default location is only
    /// used when present.
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let file = match file {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => default_file(),
        };
        let figment = Self::figment(file.as_deref(), Env::prefixed(ENV_PREFIX).split("__"), overrides);
        let config: Self = figment.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        debug!(?config, "Loaded configuration");
        Ok(config)
    }

    fn figment(file: Option<&Path>, env: Env, overrides: &Overrides) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        figment = figment.merge(env);
        if let Some(database) = &overrides.database {
            figment = figment.merge(("database", database));
        }
        if let Some(log_file) = &overrides.log_file {
            figment = figment.merge(("log_file", log_file));
        }
        if let Some(root) = &overrides.root {
            figment = figment.merge(("device.root", root));
        }
        if let Some(dry_run) = overrides.dry_run {
            figment = figment.merge(("dry_run", dry_run));
        }
        if let Some(enabled) = overrides.dialog_enabled {
            figment = figment.merge(("dialog.enabled", enabled));
        }
        figment
    }

    /// Check that every path setting is absolute.
    pub fn validate(&self) -> Result<()> {
        let paths = [
            ("database", Some(&self.database)),
            ("log_file", Some(&self.log_file)),
            ("device.mount_point", Some(&self.device.mount_point)),
            ("device.root", self.device.root.as_ref()),
        ];
        for (key, path) in paths {
            if let Some(path) = path
                && !path.is_absolute()
            {
                exn::bail!(ErrorKind::NotAbsolute { key, path: path.clone() });
            }
        }
        Ok(())
    }
}

fn default_file() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "pbfix")?;
    let path = dirs.config_dir().join(FILE_NAME);
    path.is_file().then_some(path)
}
