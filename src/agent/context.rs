//! Per-process agent context built once at plugin load.

use tracing::info;

use crate::handoff::{HandoffEnvironmentValue, AUTOLOAD_ENV_VAR};

/// How this process was started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentContext {
    handoff: HandoffEnvironmentValue,
}

impl AgentContext {
    /// Context for an explicit handoff value.
    #[must_use]
    pub fn new(handoff: HandoffEnvironmentValue) -> Self {
        Self { handoff }
    }

    /// Context read from the process environment, logging the mode.
    #[must_use]
    pub fn from_env() -> Self {
        let handoff = HandoffEnvironmentValue::from_env();
        match &handoff {
            HandoffEnvironmentValue::Unset => {
                info!(var = AUTOLOAD_ENV_VAR, "not set, proceeding normally");
            }
            HandoffEnvironmentValue::SkipIntro => {
                info!(var = AUTOLOAD_ENV_VAR, "skip-intro sentinel set, skipping intro");
            }
            HandoffEnvironmentValue::AutoLoad(name) => {
                info!(var = AUTOLOAD_ENV_VAR, save = name.as_str(), "auto-loading save");
            }
        }
        Self::new(handoff)
    }

    /// The handoff value this context was built from.
    #[must_use]
    pub fn handoff(&self) -> &HandoffEnvironmentValue {
        &self.handoff
    }

    /// Save to resume, when in auto-resume mode.
    #[must_use]
    pub fn auto_load_save(&self) -> Option<&str> {
        match &self.handoff {
            HandoffEnvironmentValue::AutoLoad(name) => Some(name),
            _ => None,
        }
    }

    /// Whether the main menu should stay hidden.
    #[must_use]
    pub fn is_auto_load(&self) -> bool {
        self.auto_load_save().is_some()
    }

    /// Whether the intro movie should be skipped.
    #[must_use]
    pub fn skips_intro(&self) -> bool {
        !matches!(self.handoff, HandoffEnvironmentValue::Unset)
    }
}

impl Default for AgentContext {
    fn default() -> Self {
        Self::new(HandoffEnvironmentValue::Unset)
    }
}
