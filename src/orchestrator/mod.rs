//! Restart orchestration modules.
//!
//! Covers the restart decision hand-off and companion process spawning.

pub mod restart;
pub mod spawner;

pub use restart::RestartOrchestrator;
pub use spawner::{CompanionSpawner, ProcessSpawner};
