//! The environment value carrying the save target into the relaunched game.

use std::env;
use std::fmt::{Display, Formatter};

/// Name of the inherited environment variable.
pub const AUTOLOAD_ENV_VAR: &str = "SKYRIM_AUTOLOAD_FILE_NAME";

/// Sentinel meaning "no save to load, but skip the intro".
pub const SKIP_INTRO_SENTINEL: &str = "$$$_MAIN_MENU_$$$";

/// The three observable states of [`AUTOLOAD_ENV_VAR`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandoffEnvironmentValue {
    /// Variable absent: normal boot.
    Unset,
    /// Sentinel present: boot to the main menu without the intro.
    SkipIntro,
    /// Literal save name: auto-resume that save.
    AutoLoad(String),
}

impl HandoffEnvironmentValue {
    /// Interpret a raw variable value. An empty value counts as unset.
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Self::Unset,
            Some(SKIP_INTRO_SENTINEL) => Self::SkipIntro,
            Some(name) => Self::AutoLoad(name.to_owned()),
        }
    }

    /// Read the value from the current process environment.
    #[must_use]
    pub fn from_env() -> Self {
        let raw = env::var_os(AUTOLOAD_ENV_VAR).map(|value| value.to_string_lossy().into_owned());
        Self::from_raw(raw.as_deref())
    }

    /// The value the companion sets for a restart with an optional save name.
    #[must_use]
    pub fn for_filename(filename: Option<&str>) -> Self {
        match filename {
            Some(name) if !name.is_empty() => Self::AutoLoad(name.to_owned()),
            _ => Self::SkipIntro,
        }
    }

    /// The literal string to place in the environment, `None` when unset.
    #[must_use]
    pub fn as_env_value(&self) -> Option<&str> {
        match self {
            Self::Unset => None,
            Self::SkipIntro => Some(SKIP_INTRO_SENTINEL),
            Self::AutoLoad(name) => Some(name),
        }
    }
}

impl Display for HandoffEnvironmentValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unset => write!(f, "unset"),
            Self::SkipIntro => write!(f, "{SKIP_INTRO_SENTINEL}"),
            Self::AutoLoad(name) => write!(f, "{name}"),
        }
    }
}
