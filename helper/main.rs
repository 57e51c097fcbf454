//! `auto-reloader-helper`: relaunch companion for the in-game agent.
//!
//! Spawned by the agent with the restart request as arguments. Waits for the
//! game process to exit, starts it again with the save target in the
//! environment, and shows a wait indicator until the game window is back.

use std::process::ExitCode;

use tracing::{error, info};

use auto_reloader::companion::{
    self, HostWindowProbe, OsExitWaiter, OsRelauncher, ProcessWatcher, StatusPresenter,
};
use auto_reloader::config::{CompanionSettings, COMPANION_LOG_FILE};
use auto_reloader::handoff::RestartRequest;
use auto_reloader::logging::{self, LogFormat};
use auto_reloader::{AppError, Result};

const MANUAL_RUN_MESSAGE: &str = "Do not run this application manually.";

fn main() -> ExitCode {
    let settings = CompanionSettings::default();
    if let Err(err) = logging::init_tracing(
        settings.log_directory.as_deref(),
        COMPANION_LOG_FILE,
        "trace",
        LogFormat::Text,
    ) {
        eprintln!("{err}");
    }

    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    if args.is_empty() {
        error!("{MANUAL_RUN_MESSAGE}");
        eprintln!("{MANUAL_RUN_MESSAGE}");
        return ExitCode::FAILURE;
    }

    let request = match RestartRequest::from_arguments(args) {
        Ok(request) => request,
        Err(err) => {
            error!(%err, "invalid companion arguments");
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&request, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(request: &RestartRequest, settings: &CompanionSettings) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Spawn(format!("failed to build tokio runtime: {err}")))?;

    let watcher = ProcessWatcher::new(OsExitWaiter, OsRelauncher);
    let presenter = StatusPresenter::from_settings(settings);
    let probe = HostWindowProbe::new(settings.host_window_title.clone());

    let outcome = runtime.block_on(companion::run(request, &watcher, &presenter, &probe))?;
    info!(?outcome, "companion exiting");
    Ok(())
}
