//! The relaunch companion.
//!
//! Runs as a short-lived, detached process: parse the handoff, wait for the
//! game to exit, relaunch it, then show a bounded wait indicator.

pub mod status;
pub mod watcher;

pub use status::{HostWindowProbe, StatusOutcome, StatusPresenter, WindowProbe};
pub use watcher::{
    ExitWaiter, OsExitWaiter, OsRelauncher, ProcessWatcher, RelaunchPlan, Relaunched, Relauncher,
};

use tracing::{error, info};

use crate::handoff::RestartRequest;
use crate::Result;

/// Relaunch the game for `request`, then run the status indicator.
///
/// # Errors
///
/// Returns `AppError::Spawn` if the game could not be relaunched; the
/// indicator is skipped in that case.
pub async fn run<W, R>(
    request: &RestartRequest,
    watcher: &ProcessWatcher<W, R>,
    presenter: &StatusPresenter,
    probe: &dyn WindowProbe,
) -> Result<StatusOutcome>
where
    W: ExitWaiter,
    R: Relauncher,
{
    info!(
        pid = request.origin_process_id,
        command_line = request.origin_command_line,
        filename = request.target_save_name.as_deref().unwrap_or(""),
        "companion started"
    );
    if request.target_save_name.is_none() {
        info!("no filename argument, starting game normally");
    }

    let relaunched = watcher.await_and_relaunch(request).await.map_err(|err| {
        error!(%err, "restarting game failed");
        err
    })?;

    let outcome = presenter.run(probe).await;
    info!(?outcome, new_pid = relaunched.pid.unwrap_or(0), "companion finished");
    Ok(outcome)
}
