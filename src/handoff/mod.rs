//! Cross-process handoff between the agent and the companion.
//!
//! The agent passes a [`RestartRequest`] to the companion as process
//! arguments. The companion passes the save target on to the relaunched game
//! through a single inherited environment variable, modelled by
//! [`HandoffEnvironmentValue`].

pub mod args;
pub mod environment;
pub mod request;

pub use args::{quote, split_command_line};
pub use environment::{HandoffEnvironmentValue, AUTOLOAD_ENV_VAR, SKIP_INTRO_SENTINEL};
pub use request::{RestartRequest, HANDOFF_VERSION};
