//! Reconstruction of the loader command line the current game was started with.
//!
//! The loader may elaborate the user's command line (steam fallback,
//! alternate executable or library). Those elaborations only surface in the
//! loader's log, which [`loader_log`] scrapes. [`builder`] turns whatever a
//! [`LaunchOptionSource`] reports into a [`LaunchLineSpec`].

pub mod builder;
pub mod loader_log;

use std::fmt::{Display, Formatter};

pub use builder::LaunchLineBuilder;
pub use loader_log::LoaderLog;

use crate::Result;

/// Flag forcing the steam loader path.
pub const FLAG_FORCE_STEAM_LOADER: &str = "-forcesteamloader";
/// Flag selecting an alternate game executable.
pub const FLAG_ALT_EXE: &str = "-altexe";
/// Flag selecting an alternate runtime library.
pub const FLAG_ALT_DLL: &str = "-altdll";
/// Flag setting the process priority class.
pub const FLAG_PRIORITY: &str = "-priority";

/// A launch option the loader applied to the current run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOption {
    /// The steam loader was forced.
    ForceSteamLoader,
    /// An alternate executable was launched.
    AlternateExe(String),
    /// An alternate library was injected.
    AlternateDll(String),
}

impl LaunchOption {
    /// Command-line tokens for this option.
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        match self {
            Self::ForceSteamLoader => vec![FLAG_FORCE_STEAM_LOADER.to_owned()],
            Self::AlternateExe(path) => vec![FLAG_ALT_EXE.to_owned(), path.clone()],
            Self::AlternateDll(path) => vec![FLAG_ALT_DLL.to_owned(), path.clone()],
        }
    }
}

/// Source of the launch options applied to the current run.
///
/// The loader log is the only source today; a structured one can replace it
/// without touching the restart logic.
pub trait LaunchOptionSource: Send + Sync {
    /// Options in the order they were applied.
    ///
    /// # Errors
    ///
    /// Returns `AppError::LaunchLineRead` if the source is unavailable.
    fn launch_options(&self) -> Result<Vec<LaunchOption>>;
}

/// Ordered command-line tokens, loader executable first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchLineSpec {
    tokens: Vec<String>,
}

impl LaunchLineSpec {
    /// Start a command line with the loader executable.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            tokens: vec![program.into()],
        }
    }

    /// Append tokens.
    pub fn extend<I>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.tokens.extend(tokens);
    }

    /// All tokens, program first.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Loader executable.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// Tokens after the program.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.tokens[1..]
    }
}

impl Display for LaunchLineSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}
