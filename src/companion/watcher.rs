//! Wait for the original game process to exit, then relaunch it.
//!
//! The wait has no timeout: relaunching while the old process is still
//! alive would leave two game instances behind.

use std::future::Future;
use std::pin::Pin;

use tokio::process::Command;
use tracing::{info, info_span, warn, Instrument as _};

use crate::handoff::{split_command_line, HandoffEnvironmentValue, RestartRequest, AUTOLOAD_ENV_VAR};
use crate::platform;
use crate::{AppError, Result};

/// `CREATE_NO_WINDOW` process creation flag.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Blocks until a process has exited.
pub trait ExitWaiter: Send + Sync {
    /// Wait for `pid` to terminate.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Watch` if the process cannot be opened or waited on.
    fn wait_for_exit(&self, pid: u32) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Waits on real OS processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsExitWaiter;

impl ExitWaiter for OsExitWaiter {
    fn wait_for_exit(&self, pid: u32) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(platform::wait_for_exit(pid))
    }
}

/// Everything needed to start the game again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaunchPlan {
    /// Full command line as received.
    pub command_line: String,
    /// Executable, the first token of the command line.
    pub program: String,
    /// Remaining tokens.
    pub arguments: Vec<String>,
    /// Raw text after the program, passed verbatim on Windows.
    pub raw_arguments: String,
    /// Value of [`AUTOLOAD_ENV_VAR`] in the child's initial environment.
    pub environment: HandoffEnvironmentValue,
}

impl RelaunchPlan {
    /// Derive the plan from a parsed request.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Spawn` if the command line has no program token.
    pub fn from_request(request: &RestartRequest) -> Result<Self> {
        let command_line = request.origin_command_line.trim().to_owned();
        let mut tokens = split_command_line(&command_line).into_iter();
        let program = tokens
            .next()
            .ok_or_else(|| AppError::Spawn("command line has no program".into()))?;

        Ok(Self {
            raw_arguments: raw_arguments_after_program(&command_line),
            program,
            arguments: tokens.collect(),
            environment: HandoffEnvironmentValue::for_filename(
                request.target_save_name.as_deref(),
            ),
            command_line,
        })
    }
}

/// Text following the first (possibly quoted) token.
fn raw_arguments_after_program(command_line: &str) -> String {
    let mut in_quotes = false;
    for (idx, c) in command_line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ' ' if !in_quotes => return command_line[idx..].trim_start().to_owned(),
            _ => {}
        }
    }
    String::new()
}

/// Starts the game from a [`RelaunchPlan`].
pub trait Relauncher: Send + Sync {
    /// Spawn the plan's command line, returning the new process id if known.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Spawn` if the process cannot be created.
    fn relaunch(&self, plan: &RelaunchPlan) -> Result<Option<u32>>;
}

/// Spawns a detached OS process without a console window.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRelauncher;

impl OsRelauncher {
    fn command(plan: &RelaunchPlan) -> Command {
        let mut cmd = Command::new(&plan.program);

        #[cfg(windows)]
        {
            cmd.raw_arg(&plan.raw_arguments);
            cmd.creation_flags(CREATE_NO_WINDOW);
        }
        #[cfg(not(windows))]
        {
            cmd.args(&plan.arguments);
        }

        match plan.environment.as_env_value() {
            Some(value) => cmd.env(AUTOLOAD_ENV_VAR, value),
            None => cmd.env_remove(AUTOLOAD_ENV_VAR),
        };
        cmd
    }
}

impl Relauncher for OsRelauncher {
    fn relaunch(&self, plan: &RelaunchPlan) -> Result<Option<u32>> {
        // The child keeps running after its handle is dropped.
        let child = Self::command(plan).spawn().map_err(|err| {
            AppError::Spawn(format!(
                "failed to create process {}: {err}",
                plan.command_line
            ))
        })?;
        Ok(child.id())
    }
}

/// Outcome of a successful relaunch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relaunched {
    /// Plan that was executed.
    pub plan: RelaunchPlan,
    /// Process id of the new game process, if known.
    pub pid: Option<u32>,
}

/// Waits for the old game process and starts the new one.
#[derive(Debug, Clone, Default)]
pub struct ProcessWatcher<W, R> {
    waiter: W,
    relauncher: R,
}

impl<W: ExitWaiter, R: Relauncher> ProcessWatcher<W, R> {
    /// Watcher with the given wait and spawn strategies.
    #[must_use]
    pub fn new(waiter: W, relauncher: R) -> Self {
        Self { waiter, relauncher }
    }

    /// Wait for the request's process to exit, then relaunch.
    ///
    /// A process that cannot be opened is assumed to have exited already.
    /// The environment value is part of the plan and so is fixed before the
    /// spawn happens.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Spawn` if the relaunch fails; no retry is made.
    pub async fn await_and_relaunch(&self, request: &RestartRequest) -> Result<Relaunched> {
        let span = info_span!(
            "await_and_relaunch",
            pid = request.origin_process_id,
            request_id = ?request.request_id
        );

        async {
            match self.waiter.wait_for_exit(request.origin_process_id).await {
                Ok(()) => info!("game process terminated"),
                Err(err) => {
                    warn!(%err, "failed to open process, assuming game process already terminated");
                }
            }

            let plan = RelaunchPlan::from_request(request)?;
            info!(
                command_line = plan.command_line,
                env = %plan.environment,
                "launching"
            );

            let pid = self.relauncher.relaunch(&plan)?;
            info!(new_pid = pid.unwrap_or(0), "game relaunched");
            Ok(Relaunched { plan, pid })
        }
        .instrument(span)
        .await
    }
}
