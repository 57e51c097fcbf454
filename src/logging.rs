//! Tracing subscriber setup shared by the agent and the companion.
//!
//! Each process writes to its own file inside the log directory. The file is
//! truncated at startup so it only describes the current run. When the
//! directory is unavailable the subscriber writes to stderr instead.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Deserialize;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{AppError, Result};

/// Log line format.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable single-line records.
    #[default]
    Text,
    /// One JSON object per record.
    Json,
}

/// Open (and truncate) the log file `file_name` inside `log_dir`.
///
/// # Errors
///
/// Returns `AppError::Io` if the directory cannot be created or the file
/// cannot be opened for writing.
pub fn open_log_file(log_dir: &Path, file_name: &str) -> Result<(File, PathBuf)> {
    fs::create_dir_all(log_dir)
        .map_err(|err| AppError::Io(format!("cannot create log directory: {err}")))?;
    let path = log_dir.join(file_name);
    let file = File::create(&path)
        .map_err(|err| AppError::Io(format!("cannot open log file {}: {err}", path.display())))?;
    Ok((file, path))
}

/// Build the filter: `RUST_LOG` wins, otherwise `default_filter`.
///
/// # Errors
///
/// Returns `AppError::Config` if `default_filter` is not a valid directive.
pub fn build_filter(default_filter: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_filter)
            .map_err(|err| AppError::Config(format!("invalid log filter {default_filter}: {err}"))),
    }
}

/// Install the global tracing subscriber.
///
/// Returns the log file path when logging goes to a file, `None` when it
/// fell back to stderr.
///
/// # Errors
///
/// Returns `AppError::Config` if the filter is invalid or a global
/// subscriber is already installed.
pub fn init_tracing(
    log_dir: Option<&Path>,
    file_name: &str,
    default_filter: &str,
    log_format: LogFormat,
) -> Result<Option<PathBuf>> {
    let env_filter = build_filter(default_filter)?;

    let (writer, log_path) = match log_dir.map(|dir| open_log_file(dir, file_name)) {
        Some(Ok((file, path))) => (BoxMakeWriter::new(Mutex::new(file)), Some(path)),
        Some(Err(err)) => {
            eprintln!("{err}; logging to stderr");
            (BoxMakeWriter::new(std::io::stderr), None)
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(log_path)
}
