//! `clinic-console` binary: restores the session, then runs one command or
//! the interactive shell.

use clap::Parser;
use clinic_console::app::{App, TerminalView};
use clinic_console::cli::{run_args, run_shell};
use clinic_console::config::ConsoleConfig;
use clinic_console::debug;
use clinic_console::services::{
    ApiClient, FileTokenStorage, MemoryTokenStorage, SessionHandle, TokenStorage,
};
use clinic_console::Result;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "clinic-console", version)]
#[command(about = "Admin console for the clinic-management backend")]
struct Args {
    /// Backend base URL
    #[arg(long, env = "CLINIC_API_URL")]
    api_url: Option<String>,

    /// File holding the persisted session token
    #[arg(long, env = "CLINIC_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Keep the token in memory only
    #[arg(long)]
    no_persist: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short, long)]
    yes: bool,

    /// Run a single command and exit, e.g. `page patients`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    let _guard = debug::init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Console exited with an error");
            eprintln!("✘ {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = ConsoleConfig::from_env()?;
    if let Some(url) = args.api_url {
        config.api_url = url;
    }
    if let Some(path) = args.token_file {
        config.token_file = path;
    }
    config.validate()?;

    let storage: Arc<dyn TokenStorage> = if args.no_persist {
        Arc::new(MemoryTokenStorage::new())
    } else {
        Arc::new(FileTokenStorage::new(&config.token_file))
    };

    let (event_tx, event_rx) = async_channel::unbounded();
    let client = ApiClient::new(&config, SessionHandle::new(storage))?.with_events(event_tx);
    tracing::info!(api_url = %client.base_url(), "Console starting");

    let app = App::new(
        Arc::new(client),
        Box::new(TerminalView::new(args.yes)),
        event_rx,
    )
    .with_doctor_role(config.doctor_role.clone());

    app.restore_session().await;

    if !args.command.is_empty() {
        run_args(&app, &args.command).await;
        return Ok(());
    }
    run_shell(&app, config.history_file.as_deref()).await
}
