//! "Game is reloading" indicator.
//!
//! Purely advisory: it waits for the relaunched game window to appear, bounded
//! by a timeout, so the companion does not vanish before the player sees the
//! game again. Its outcome never affects the relaunch itself.

use std::time::Duration;

use tracing::{debug, info};

use crate::config::CompanionSettings;
use crate::platform;

/// Reloading message shown while waiting.
pub const RELOADING_MESSAGE: &str = "Skyrim is reloading. Please wait...";

/// Detects the relaunched game window.
pub trait WindowProbe: Send + Sync {
    /// `Some(true)` once the window exists, `None` if detection is unsupported.
    fn window_present(&self) -> Option<bool>;
}

/// Looks for a top-level window by title.
#[derive(Debug, Clone)]
pub struct HostWindowProbe {
    title: String,
}

impl HostWindowProbe {
    /// Probe for windows titled `title`.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl WindowProbe for HostWindowProbe {
    fn window_present(&self) -> Option<bool> {
        platform::host_window_present(&self.title)
    }
}

/// How the indicator ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutcome {
    /// The game window appeared.
    WindowFound,
    /// The timeout elapsed first.
    TimedOut,
    /// Window detection is not available on this platform.
    Unsupported,
}

/// Bounded polling loop for the game window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPresenter {
    poll_interval: Duration,
    timeout: Duration,
}

impl StatusPresenter {
    /// Presenter polling every `poll_interval` for at most `timeout`.
    #[must_use]
    pub fn new(poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            poll_interval,
            timeout,
        }
    }

    /// Presenter configured from the companion settings.
    #[must_use]
    pub fn from_settings(settings: &CompanionSettings) -> Self {
        Self::new(settings.poll_interval, settings.status_timeout)
    }

    /// Show the indicator until the window appears or the timeout elapses.
    pub async fn run(&self, probe: &dyn WindowProbe) -> StatusOutcome {
        info!(timeout = ?self.timeout, "{RELOADING_MESSAGE}");

        let wait = async {
            let mut ticker = tokio::time::interval(self.poll_interval);
            loop {
                ticker.tick().await;
                match probe.window_present() {
                    Some(true) => return StatusOutcome::WindowFound,
                    Some(false) => {}
                    None => return StatusOutcome::Unsupported,
                }
            }
        };

        let outcome = tokio::time::timeout(self.timeout, wait)
            .await
            .unwrap_or(StatusOutcome::TimedOut);
        debug!(?outcome, "status indicator finished");
        outcome
    }
}
