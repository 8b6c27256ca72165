mod cli;
mod dialog;
mod error;
mod logging;

use crate::cli::Args;
use crate::dialog::{DialogPrompt, TerminalPrompt, UnattendedPrompt};
use crate::error::{ErrorKind, Result};
use clap::Parser;
use exn::ResultExt;
use pbfix_config::Config;
use pbfix_explorer::{Database, Repository};
use pbfix_library::prompt::{OK, YES};
use pbfix_library::{Icon, Prompt, PromptHandle, Summary};
use pbfix_storage::BackendHandle;
use pbfix_storage::backend::LocalBackend;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

const DELETE_LOG: &str = "Delete Log";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    let config = match Config::load(args.config.as_deref(), &args.overrides()) {
        Ok(config) => config,
        Err(err) => {
            // No log sink yet, and no idea where the dialog lives.
            eprintln!("{:?}", err.raise(ErrorKind::Config));
            return ExitCode::FAILURE;
        },
    };
    let prompt = select_prompt(&args, &config);
    if let Err(err) = logging::init(&config.log_file) {
        eprintln!("{err:?}");
        prompt.notify(Icon::Attention, &err.to_string()).await;
        return ExitCode::FAILURE;
    }
    match run(&config, prompt.as_ref()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = ?err, "Fatal error");
            prompt.notify(Icon::Attention, &err.to_string()).await;
            ExitCode::FAILURE
        },
    }
}

fn select_prompt(args: &Args, config: &Config) -> PromptHandle {
    if args.yes {
        return Arc::new(UnattendedPrompt::new([YES, OK]));
    }
    if config.dialog.enabled && config.dialog.program.is_file() {
        return Arc::new(DialogPrompt::new(&config.dialog.program));
    }
    Arc::new(TerminalPrompt)
}

async fn run(config: &Config, prompt: &dyn Prompt) -> Result<()> {
    info!(database = %config.database.display(), dry_run = config.dry_run, "Starting");
    let db = Database::connect(&config.database).await.or_raise(|| ErrorKind::Database)?;
    let repository = Repository::new(db.pool().clone(), config.dry_run);
    let backend = LocalBackend::new("device", &config.device.mount_point, config.device.local_root())
        .or_raise(|| ErrorKind::Storage)?;
    let backend: BackendHandle = Arc::new(backend);
    let summary = pbfix_library::fix(&repository, &backend, prompt).await;
    db.close().await;
    let summary = summary.or_raise(|| ErrorKind::Fix)?;
    finish(&summary, &config.log_file, prompt).await;
    Ok(())
}

/// Tell the user how it went, and let them decide whether the log stays.
async fn finish(summary: &Summary, log_file: &Path, prompt: &dyn Prompt) {
    if summary.is_clean() {
        prompt.notify(Icon::Info, "Nothing had to be fixed").await;
        logging::remove(log_file);
        return;
    }
    if prompt.ask(Icon::Info, &summary.to_string(), &[DELETE_LOG, OK]).await == Some(1) {
        logging::remove(log_file);
    }
}
