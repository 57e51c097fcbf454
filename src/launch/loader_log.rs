//! Scraper for the loader's startup log.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;

use super::{LaunchOption, LaunchOptionSource};
use crate::{AppError, Result};

const FORCE_STEAM_LOADER_PREFIX: &str = "forcing steam loader";

#[allow(clippy::unwrap_used)]
fn alternate_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^launching alternate (exe|dll)[^(]*\(([^)]*)\)").unwrap())
}

/// Parse one log line into a launch option.
#[must_use]
pub fn parse_line(line: &str) -> Option<LaunchOption> {
    if line.starts_with(FORCE_STEAM_LOADER_PREFIX) {
        return Some(LaunchOption::ForceSteamLoader);
    }

    let captures = alternate_pattern().captures(line)?;
    let value = captures[2].to_owned();
    match &captures[1] {
        "exe" => Some(LaunchOption::AlternateExe(value)),
        _ => Some(LaunchOption::AlternateDll(value)),
    }
}

/// Scan a whole log in order.
///
/// Only the first steam-loader line counts; alternate exe/dll lines are all
/// kept, in order of appearance. Invalid UTF-8 is replaced, not rejected.
///
/// # Errors
///
/// Returns `AppError::LaunchLineRead` if reading fails mid-stream.
pub fn parse_log<R: BufRead>(mut reader: R) -> Result<Vec<LaunchOption>> {
    let mut options = Vec::new();
    let mut forced = false;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|err| AppError::LaunchLineRead(format!("failed to read loader log: {err}")))?;
        if read == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        match parse_line(line.trim_end_matches(['\r', '\n'])) {
            Some(LaunchOption::ForceSteamLoader) if forced => {}
            Some(LaunchOption::ForceSteamLoader) => {
                forced = true;
                options.push(LaunchOption::ForceSteamLoader);
            }
            Some(option) => options.push(option),
            None => {}
        }
    }

    Ok(options)
}

/// The loader log file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderLog {
    path: Option<PathBuf>,
}

impl LoaderLog {
    /// Read from `path`; `None` means the log location is unknown.
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl LaunchOptionSource for LoaderLog {
    fn launch_options(&self) -> Result<Vec<LaunchOption>> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| AppError::LaunchLineRead("loader log location unknown".into()))?;
        let file = File::open(path).map_err(|err| {
            AppError::LaunchLineRead(format!("cannot open {}: {err}", path.display()))
        })?;
        parse_log(BufReader::new(file))
    }
}
