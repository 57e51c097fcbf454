//! Restart request and its argument encoding.
//!
//! Wire grammar (alternating flag/value pairs, any order):
//!
//! ```text
//! [--handoff-version <n>] [--request-id <uuid>]
//! --pid <positive integer> --commandline "<string>" [--filename "<string>"]
//! ```
//!
//! A missing `--handoff-version` means version 1, so a companion can be
//! driven by a plain `--pid`/`--commandline`/`--filename` invocation.

use uuid::Uuid;

use super::args::{quote, split_command_line};
use crate::{AppError, Result};

/// Current handoff protocol version.
pub const HANDOFF_VERSION: u32 = 1;

const FLAG_VERSION: &str = "--handoff-version";
const FLAG_REQUEST_ID: &str = "--request-id";
const FLAG_PID: &str = "--pid";
const FLAG_COMMANDLINE: &str = "--commandline";
const FLAG_FILENAME: &str = "--filename";

/// Everything the companion needs to restart the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartRequest {
    /// Handoff protocol version.
    pub version: u32,
    /// Correlates the agent and companion logs for one restart.
    pub request_id: Option<Uuid>,
    /// Process id of the game process that must exit first.
    pub origin_process_id: u32,
    /// Reconstructed loader command line.
    pub origin_command_line: String,
    /// Save to resume after the relaunch; `None` boots to the main menu.
    pub target_save_name: Option<String>,
}

impl RestartRequest {
    /// Create a request with a fresh request id.
    #[must_use]
    pub fn new(
        origin_process_id: u32,
        origin_command_line: String,
        target_save_name: Option<String>,
    ) -> Self {
        Self {
            version: HANDOFF_VERSION,
            request_id: Some(Uuid::new_v4()),
            origin_process_id,
            origin_command_line,
            target_save_name: target_save_name.filter(|name| !name.is_empty()),
        }
    }

    /// Encode as discrete argument tokens (unquoted).
    #[must_use]
    pub fn to_arguments(&self) -> Vec<String> {
        let mut args = vec![FLAG_VERSION.to_owned(), self.version.to_string()];
        if let Some(id) = self.request_id {
            args.push(FLAG_REQUEST_ID.to_owned());
            args.push(id.to_string());
        }
        args.push(FLAG_PID.to_owned());
        args.push(self.origin_process_id.to_string());
        args.push(FLAG_COMMANDLINE.to_owned());
        args.push(self.origin_command_line.clone());
        if let Some(ref name) = self.target_save_name {
            args.push(FLAG_FILENAME.to_owned());
            args.push(name.clone());
        }
        args
    }

    /// Encode as a single argument string with string values quoted.
    #[must_use]
    pub fn to_command_line(&self) -> String {
        let mut line = format!("{FLAG_VERSION} {}", self.version);
        if let Some(id) = self.request_id {
            line.push_str(&format!(" {FLAG_REQUEST_ID} {id}"));
        }
        line.push_str(&format!(
            " {FLAG_PID} {} {FLAG_COMMANDLINE} {}",
            self.origin_process_id,
            quote(&self.origin_command_line)
        ));
        if let Some(ref name) = self.target_save_name {
            line.push_str(&format!(" {FLAG_FILENAME} {}", quote(name)));
        }
        line
    }

    /// Parse a raw argument string (see [`split_command_line`]).
    ///
    /// # Errors
    ///
    /// Same as [`RestartRequest::from_arguments`].
    pub fn parse(raw: &str) -> Result<Self> {
        Self::from_arguments(split_command_line(raw))
    }

    /// Parse already-split argument tokens.
    ///
    /// # Errors
    ///
    /// - `AppError::Usage` if no arguments were supplied, a flag is unknown,
    ///   `--pid` or `--commandline` is absent, or the version is unsupported.
    /// - `AppError::MissingArgument` if a flag has no following value.
    /// - `AppError::InvalidArgument` if `--pid` is not a positive integer, or
    ///   `--handoff-version` / `--request-id` is malformed.
    pub fn from_arguments<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = args.into_iter().map(Into::into).collect();
        if tokens.is_empty() {
            return Err(AppError::Usage("no arguments supplied".into()));
        }

        let mut version = HANDOFF_VERSION;
        let mut request_id = None;
        let mut pid = None;
        let mut command_line = None;
        let mut filename = None;

        for pair in tokens.chunks(2) {
            let flag = pair[0].as_str();
            let Some(value) = pair.get(1) else {
                return Err(AppError::MissingArgument(format!(
                    "missing argument value for {flag}"
                )));
            };

            match flag {
                FLAG_VERSION => version = parse_version(value)?,
                FLAG_REQUEST_ID => {
                    let id = Uuid::parse_str(value).map_err(|err| {
                        AppError::InvalidArgument(format!("invalid request id {value}: {err}"))
                    })?;
                    request_id = Some(id);
                }
                FLAG_PID => pid = Some(parse_pid(value)?),
                FLAG_COMMANDLINE => command_line = Some(value.clone()),
                FLAG_FILENAME => filename = Some(value.clone()),
                other => return Err(AppError::Usage(format!("invalid argument {other}"))),
            }
        }

        let origin_process_id =
            pid.ok_or_else(|| AppError::Usage("missing --pid argument".into()))?;
        let origin_command_line = command_line
            .filter(|line| !line.trim().is_empty())
            .ok_or_else(|| AppError::Usage("missing --commandline argument".into()))?;

        Ok(Self {
            version,
            request_id,
            origin_process_id,
            origin_command_line,
            target_save_name: filename.filter(|name| !name.is_empty()),
        })
    }
}

fn parse_pid(value: &str) -> Result<u32> {
    let pid: i64 = value
        .parse()
        .map_err(|_| AppError::InvalidArgument(format!("invalid argument for pid: {value}")))?;
    if pid <= 0 {
        return Err(AppError::InvalidArgument(format!(
            "pid must be positive: {value}"
        )));
    }
    u32::try_from(pid)
        .map_err(|_| AppError::InvalidArgument(format!("pid out of range: {value}")))
}

fn parse_version(value: &str) -> Result<u32> {
    let version: u32 = value.parse().map_err(|_| {
        AppError::InvalidArgument(format!("invalid handoff version: {value}"))
    })?;
    if version != HANDOFF_VERSION {
        return Err(AppError::Usage(format!(
            "unsupported handoff version {version} (expected {HANDOFF_VERSION})"
        )));
    }
    Ok(version)
}
