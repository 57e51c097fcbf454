//! Transparent game restart before save loading.
//!
//! The [`agent`] runs inside the game process and turns loads that would
//! reuse stale in-process state into restarts. The [`companion`] is the
//! detached helper that waits for the old process to exit and starts a new
//! one, handing the save target over through [`handoff`].

pub mod agent;
pub mod companion;
pub mod config;
pub mod errors;
pub mod handoff;
pub mod launch;
pub mod logging;
pub mod orchestrator;
pub mod platform;

pub use config::AgentConfig;
pub use errors::{AppError, Result};
