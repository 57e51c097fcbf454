//! Restart orchestration inside the game process.
//!
//! Builds the launch line, hands the request to the companion and asks the
//! host to quit. A failed spawn leaves the game running untouched.

use tracing::{error, info, info_span, warn};
use uuid::Uuid;

use super::spawner::CompanionSpawner;
use crate::agent::host::GameHost;
use crate::handoff::RestartRequest;
use crate::launch::LaunchLineBuilder;
use crate::platform::{self, PriorityClass};
use crate::{AppError, Result};

/// Hands restart requests to the companion. The triggers live in
/// [`crate::agent::Agent`].
#[derive(Debug)]
pub struct RestartOrchestrator<S> {
    builder: LaunchLineBuilder,
    spawner: S,
    process_id: u32,
    priority: fn() -> PriorityClass,
    handed_off: Option<Uuid>,
}

impl<S: CompanionSpawner> RestartOrchestrator<S> {
    /// Orchestrator for the current process.
    #[must_use]
    pub fn new(builder: LaunchLineBuilder, spawner: S) -> Self {
        Self::with_process(
            builder,
            spawner,
            platform::current_process_id(),
            platform::current_priority_class,
        )
    }

    /// Orchestrator with an explicit process id and priority lookup.
    #[must_use]
    pub fn with_process(
        builder: LaunchLineBuilder,
        spawner: S,
        process_id: u32,
        priority: fn() -> PriorityClass,
    ) -> Self {
        Self {
            builder,
            spawner,
            process_id,
            priority,
            handed_off: None,
        }
    }

    /// Whether a restart has already been handed to a companion.
    #[must_use]
    pub fn is_restart_pending(&self) -> bool {
        self.handed_off.is_some()
    }

    /// The spawner, for inspection.
    #[must_use]
    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// Restart the game, resuming `target_save_name` afterwards if given.
    ///
    /// On success the host has been asked to quit and the request that was
    /// handed off is returned.
    ///
    /// # Errors
    ///
    /// - `AppError::RestartPending` if this process already handed off a restart.
    /// - `AppError::Spawn` if the companion could not be started; the host is
    ///   not asked to quit in that case.
    pub fn request_restart(
        &mut self,
        target_save_name: Option<&str>,
        host: &mut dyn GameHost,
    ) -> Result<RestartRequest> {
        let span = info_span!("request_restart", filename = target_save_name.unwrap_or(""));
        let _guard = span.enter();

        if let Some(id) = self.handed_off {
            warn!(request_id = %id, "restart already handed off, ignoring request");
            return Err(AppError::RestartPending(format!(
                "restart {id} already handed off"
            )));
        }

        info!("restart requested");
        let line = self.builder.build((self.priority)());
        let request = RestartRequest::new(
            self.process_id,
            line.to_string(),
            target_save_name.map(str::to_owned),
        );

        if let Err(err) = self.spawner.spawn_companion(&request) {
            error!(%err, arguments = request.to_command_line(), "failed to create companion process");
            return Err(err);
        }

        host.request_quit();
        self.handed_off = Some(request.request_id.unwrap_or_default());
        info!(
            request_id = ?request.request_id,
            command_line = request.origin_command_line,
            "restart handed off, quitting game"
        );

        Ok(request)
    }
}
