//! Agent configuration parsing, validation, and log directory resolution.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::logging::LogFormat;
use crate::{AppError, Result};

/// File name of the agent's own log inside the log directory.
pub const AGENT_LOG_FILE: &str = "SkyrimAutoReloader.log";

/// File name of the companion's log inside the log directory.
pub const COMPANION_LOG_FILE: &str = "SkyrimAutoReload_Helper.log";

fn default_loader_executable() -> String {
    "skse64_loader.exe".into()
}

fn default_companion_path() -> PathBuf {
    PathBuf::from(r"Data\SKSE\Plugins\auto-reloader-helper.exe")
}

fn default_loader_log_name() -> String {
    "skse64_loader.log".into()
}

fn default_log_filter() -> String {
    "info".into()
}

/// Default log directory: `<Documents>/My Games/Skyrim Special Edition/SKSE`.
///
/// Returns `None` when the platform has no documents folder.
#[must_use]
pub fn default_log_directory() -> Option<PathBuf> {
    dirs::document_dir().map(|docs| {
        docs.join("My Games")
            .join("Skyrim Special Edition")
            .join("SKSE")
    })
}

/// Agent configuration parsed from `SkyrimAutoReloader.toml`.
///
/// Every field has a default, so an absent file is equivalent to an empty one.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct AgentConfig {
    /// Loader executable placed first on the reconstructed command line.
    #[serde(default = "default_loader_executable")]
    pub loader_executable: String,
    /// Companion executable, relative to the game's working directory.
    #[serde(default = "default_companion_path")]
    pub companion_path: PathBuf,
    /// Directory holding the loader log and the agent log.
    #[serde(default)]
    pub log_directory: Option<PathBuf>,
    /// File name of the loader log scraped for launch options.
    #[serde(default = "default_loader_log_name")]
    pub loader_log_name: String,
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Log line format.
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            loader_executable: default_loader_executable(),
            companion_path: default_companion_path(),
            log_directory: None,
            loader_log_name: default_loader_log_name(),
            log_filter: default_log_filter(),
            log_format: LogFormat::default(),
        }
    }
}

impl AgentConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Load configuration, falling back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file exists but cannot be read,
    /// parsed, or validated.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(raw) => Self::from_toml_str(&raw),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Config(format!("failed to read config: {err}"))),
        }
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Effective log directory: the configured one, else the documents default.
    #[must_use]
    pub fn log_directory(&self) -> Option<PathBuf> {
        self.log_directory.clone().or_else(default_log_directory)
    }

    /// Full path of the loader log, if a log directory is known.
    #[must_use]
    pub fn loader_log_path(&self) -> Option<PathBuf> {
        self.log_directory()
            .map(|dir| dir.join(&self.loader_log_name))
    }

    fn validate(&self) -> Result<()> {
        if self.loader_executable.trim().is_empty() {
            return Err(AppError::Config(
                "loader_executable must not be empty".into(),
            ));
        }

        if self.companion_path.as_os_str().is_empty() {
            return Err(AppError::Config("companion_path must not be empty".into()));
        }

        if self.loader_log_name.trim().is_empty() {
            return Err(AppError::Config("loader_log_name must not be empty".into()));
        }

        Ok(())
    }
}

/// Fixed companion settings for the status indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionSettings {
    /// Interval between checks for the relaunched host window.
    pub poll_interval: Duration,
    /// Upper bound on how long the indicator waits for the window.
    pub status_timeout: Duration,
    /// Title of the host game window.
    pub host_window_title: String,
    /// Directory receiving the companion log.
    pub log_directory: Option<PathBuf>,
}

impl Default for CompanionSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            status_timeout: Duration::from_secs(30),
            host_window_title: "Skyrim Special Edition".into(),
            log_directory: default_log_directory(),
        }
    }
}
