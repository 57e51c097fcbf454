//! Unix process primitives used when the tooling runs off Windows.

use std::time::Duration;

use nix::errno::Errno;
use nix::sys::signal::kill;
use nix::unistd::Pid;
use tracing::debug;

use super::PriorityClass;
use crate::{AppError, Result};

/// Interval between liveness probes while waiting for a process to exit.
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Extract the nice value (field 19) from a `/proc/<pid>/stat` line.
pub(super) fn nice_from_stat(stat: &str) -> Option<i32> {
    // The command name may contain spaces and parentheses; fields after it
    // start at the last ')'.
    let (_, rest) = stat.rsplit_once(')')?;
    rest.split_whitespace().nth(16)?.parse().ok()
}

pub(super) fn current_priority_class() -> PriorityClass {
    match std::fs::read_to_string("/proc/self/stat") {
        Ok(stat) => nice_from_stat(&stat).map_or(PriorityClass::Normal, PriorityClass::from_nice),
        Err(err) => {
            debug!(%err, "cannot read process stat, assuming normal priority");
            PriorityClass::Normal
        }
    }
}

/// Probe whether `pid` still exists. Permission errors mean it does.
fn is_alive(pid: Pid) -> bool {
    !matches!(kill(pid, None), Err(Errno::ESRCH))
}

pub(super) async fn wait_for_exit(pid: u32) -> Result<()> {
    let raw = i32::try_from(pid)
        .map_err(|_| AppError::Watch(format!("pid {pid} out of range")))?;
    let pid = Pid::from_raw(raw);

    if !is_alive(pid) {
        return Err(AppError::Watch(format!("no process with pid {raw}")));
    }

    while is_alive(pid) {
        tokio::time::sleep(EXIT_POLL_INTERVAL).await;
    }
    Ok(())
}
