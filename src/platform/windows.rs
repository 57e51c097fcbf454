//! Win32 process and window primitives.
#![allow(unsafe_code)]

use std::iter;

use tracing::{error, warn};
use windows_sys::Win32::Foundation::{CloseHandle, HANDLE, WAIT_OBJECT_0};
use windows_sys::Win32::System::Threading::{
    GetCurrentProcess, GetPriorityClass, OpenProcess, WaitForSingleObject, INFINITE,
    PROCESS_QUERY_INFORMATION, PROCESS_SYNCHRONIZE,
};
use windows_sys::Win32::UI::WindowsAndMessaging::FindWindowW;

use super::PriorityClass;
use crate::{AppError, Result};

/// Process handle closed on drop.
struct OwnedHandle(HANDLE);

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        // SAFETY: the handle came from a successful `OpenProcess` and is
        // closed exactly once.
        unsafe {
            CloseHandle(self.0);
        }
    }
}

pub(super) fn current_priority_class() -> PriorityClass {
    // SAFETY: the pseudo handle from `GetCurrentProcess` is always valid.
    let raw = unsafe { GetPriorityClass(GetCurrentProcess()) };
    PriorityClass::from_raw(raw).unwrap_or_else(|| {
        warn!(raw, "unknown priority class, assuming normal");
        PriorityClass::Normal
    })
}

/// Block until process `pid` terminates.
pub(super) fn wait_for_exit_blocking(pid: u32) -> Result<()> {
    // SAFETY: plain FFI call; a null return is handled below.
    let handle = unsafe { OpenProcess(PROCESS_QUERY_INFORMATION | PROCESS_SYNCHRONIZE, 0, pid) };
    if handle.is_null() {
        return Err(AppError::Watch(format!(
            "failed to open process {pid}: {}",
            std::io::Error::last_os_error()
        )));
    }
    let handle = OwnedHandle(handle);

    // SAFETY: `handle` is a valid process handle with SYNCHRONIZE access.
    let result = unsafe { WaitForSingleObject(handle.0, INFINITE) };
    if result != WAIT_OBJECT_0 {
        error!(
            pid,
            result,
            "WaitForSingleObject failed, attempting to continue regardless"
        );
    }
    Ok(())
}

pub(super) fn window_present(title: &str) -> bool {
    let wide: Vec<u16> = title.encode_utf16().chain(iter::once(0)).collect();
    // SAFETY: `wide` is a NUL-terminated UTF-16 buffer alive for the call.
    let hwnd = unsafe { FindWindowW(wide.as_ptr(), wide.as_ptr()) };
    !hwnd.is_null()
}
