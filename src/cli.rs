use clap::Parser;
use pbfix_config::Overrides;
use std::path::PathBuf;

/// Reconcile a PocketBook library database with the ePub files on the device.
///
/// Books that vanished from device and cloud are removed (after asking), and
/// the first author's sort name and series of every other ePub are refreshed
/// from the book's own metadata.
#[derive(Debug, Parser)]
#[command(name = "pbfix", version)]
pub struct Args {
    /// Configuration file (TOML).
    #[arg(long, env = "PBFIX_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Library database, usually `system/explorer-3/explorer-3.db`.
    #[arg(long, value_name = "FILE")]
    pub database: Option<PathBuf>,
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
    /// Local directory the device's mount point is reachable at.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
    /// Report what would be fixed without writing anything.
    #[arg(long)]
    pub dry_run: bool,
    /// Answer every question without asking: remove deleted books, keep the log.
    #[arg(long, short = 'y')]
    pub yes: bool,
    /// Ask on the terminal instead of the device's dialog.
    #[arg(long)]
    pub no_dialog: bool,
}
impl Args {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            database: self.database.clone(),
            log_file: self.log_file.clone(),
            root: self.root.clone(),
            dry_run: self.dry_run.then_some(true),
            dialog_enabled: self.no_dialog.then_some(false),
        }
    }
}
