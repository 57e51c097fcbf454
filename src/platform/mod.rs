//! Operating-system seams: priority lookup, exit waiting, window detection.

mod priority;
#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

pub use priority::PriorityClass;

/// Id of the current process.
#[must_use]
pub fn current_process_id() -> u32 {
    std::process::id()
}

/// Priority class of the current process.
///
/// Some classes are not inherited by child processes, so the relaunch
/// passes this explicitly to the loader.
#[must_use]
pub fn current_priority_class() -> PriorityClass {
    #[cfg(windows)]
    {
        windows::current_priority_class()
    }
    #[cfg(unix)]
    {
        unix::current_priority_class()
    }
    #[cfg(not(any(windows, unix)))]
    {
        PriorityClass::Normal
    }
}

/// Wait, without timeout, until process `pid` has terminated.
///
/// # Errors
///
/// Returns `AppError::Watch` if the process cannot be opened for waiting,
/// which usually means it has already exited.
pub async fn wait_for_exit(pid: u32) -> crate::Result<()> {
    #[cfg(windows)]
    {
        tokio::task::spawn_blocking(move || windows::wait_for_exit_blocking(pid))
            .await
            .map_err(|err| crate::AppError::Watch(format!("wait task panicked: {err}")))?
    }
    #[cfg(unix)]
    {
        unix::wait_for_exit(pid).await
    }
    #[cfg(not(any(windows, unix)))]
    {
        Err(crate::AppError::Watch(format!(
            "cannot wait for process {pid} on this platform"
        )))
    }
}

/// Whether a top-level window with `title` exists; `None` if unsupported.
#[must_use]
pub fn host_window_present(title: &str) -> Option<bool> {
    #[cfg(windows)]
    {
        Some(windows::window_present(title))
    }
    #[cfg(not(windows))]
    {
        let _ = title;
        None
    }
}

/// Extract the nice value from a `/proc/<pid>/stat` line.
#[cfg(unix)]
#[must_use]
pub fn nice_from_stat(stat: &str) -> Option<i32> {
    unix::nice_from_stat(stat)
}
