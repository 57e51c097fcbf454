//! Error types shared across the agent and the companion.

use std::fmt::{Display, Formatter};

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering all restart failure modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Malformed or missing handoff arguments, or an unsupported protocol version.
    Usage(String),
    /// A handoff flag was given without a following value.
    MissingArgument(String),
    /// A handoff flag carried a value that failed validation.
    InvalidArgument(String),
    /// Process creation failed, for the companion or for the relaunch.
    Spawn(String),
    /// The original process could not be opened or waited on.
    Watch(String),
    /// The loader log could not be opened or read.
    LaunchLineRead(String),
    /// Auto-resuming the requested save failed in the relaunched process.
    ResumeLoad(String),
    /// A restart was already handed off by this process.
    RestartPending(String),
    /// Configuration parsing or validation failure.
    Config(String),
    /// File-system or I/O operation failure.
    Io(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usage(msg) => write!(f, "usage: {msg}"),
            Self::MissingArgument(msg) => write!(f, "missing argument: {msg}"),
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::Spawn(msg) => write!(f, "spawn: {msg}"),
            Self::Watch(msg) => write!(f, "watch: {msg}"),
            Self::LaunchLineRead(msg) => write!(f, "launch line read: {msg}"),
            Self::ResumeLoad(msg) => write!(f, "resume load: {msg}"),
            Self::RestartPending(msg) => write!(f, "restart pending: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
