//! Log sink for a run: the log file the user gets to keep (or delete), plus
//! stderr for whoever is watching.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber, truncating `log_file`.
pub fn init(log_file: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_file)
        .or_raise(|| ErrorKind::LogFile(log_file.to_path_buf()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let timer = UtcTime::new(Rfc3339);
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_timer(timer.clone()),
        )
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).with_timer(timer))
        .try_init()
        .or_raise(|| ErrorKind::Logging)
}

/// Delete the log file; failing to do so is only worth a warning.
pub fn remove(log_file: &Path) {
    match std::fs::remove_file(log_file) {
        Ok(()) => tracing::debug!(path = %log_file.display(), "Removed log file"),
        Err(err) => tracing::warn!(path = %log_file.display(), error = %err, "Could not remove log file"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_unwritable_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("PBibFix.log");
        let err = init(&path).unwrap_err();
        assert!(matches!(&*err, ErrorKind::LogFile(p) if *p == path));
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("PBibFix.log");
        std::fs::write(&path, "Done.\n").unwrap();
        remove(&path);
        assert!(!path.exists());
        // A second removal only warns.
        remove(&path);
    }
}
