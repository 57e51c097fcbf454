//! Companion process spawner.
//!
//! Spawns the detached companion with the restart request encoded as
//! arguments. The child handle is dropped right after spawning: the
//! companion must outlive the game process that launched it.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{info, info_span};

use crate::handoff::RestartRequest;
use crate::{AppError, Result};

/// Launches the companion for a restart request.
pub trait CompanionSpawner {
    /// Spawn the companion and release its handles.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Spawn` if the process cannot be created.
    fn spawn_companion(&self, request: &RestartRequest) -> Result<()>;
}

/// Spawns the companion executable as an OS process.
#[derive(Debug, Clone)]
pub struct ProcessSpawner {
    companion_path: PathBuf,
}

impl ProcessSpawner {
    /// Spawner for the companion at `companion_path`.
    #[must_use]
    pub fn new(companion_path: impl Into<PathBuf>) -> Self {
        Self {
            companion_path: companion_path.into(),
        }
    }

    fn command(&self, request: &RestartRequest) -> Command {
        let mut cmd = Command::new(&self.companion_path);

        // Windows receives the quoted form verbatim; elsewhere the OS keeps
        // argument boundaries for us.
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt as _;
            cmd.raw_arg(request.to_command_line());
        }
        #[cfg(not(windows))]
        {
            cmd.args(request.to_arguments());
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

impl CompanionSpawner for ProcessSpawner {
    fn spawn_companion(&self, request: &RestartRequest) -> Result<()> {
        let span = info_span!(
            "spawn_companion",
            pid = request.origin_process_id,
            request_id = ?request.request_id
        );
        let _guard = span.enter();

        let child = self.command(request).spawn().map_err(|err| {
            AppError::Spawn(format!(
                "failed to spawn companion {} {}: {err}",
                self.companion_path.display(),
                request.to_command_line()
            ))
        })?;

        info!(
            companion_pid = child.id(),
            companion = %self.companion_path.display(),
            arguments = request.to_command_line(),
            "companion process spawned"
        );

        drop(child);
        Ok(())
    }
}
