//! The in-game agent.
//!
//! [`Agent`] owns the per-process context, the loading-screen state
//! machine and the restart orchestrator, and exposes one handler per host
//! event. The plugin glue constructs it once at load time and forwards the
//! host's callbacks to it.

pub mod context;
pub mod host;
pub mod load_state;

use std::path::Path;

use tracing::{error, info, warn};

use crate::config::{AgentConfig, AGENT_LOG_FILE};
use crate::launch::{LaunchLineBuilder, LoaderLog};
use crate::logging;
use crate::orchestrator::{CompanionSpawner, ProcessSpawner, RestartOrchestrator};
use crate::{AppError, Result};

pub use context::AgentContext;
pub use host::{GameHost, MenuEvent, MenuKind};
pub use load_state::{LoadState, LoadStateMachine, MenuEventSink};

/// Plugin name used in logs.
pub const PLUGIN_NAME: &str = "SkyrimAutoReloader";

/// Message shown when the auto-resume load fails.
pub const RESUME_FAILED_MESSAGE: &str = "Error loading save.";

/// What the host should do with the event it just reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookDecision {
    /// Carry on with the original behaviour.
    Proceed,
    /// A restart is under way; suppress the original behaviour.
    Restarting,
}

/// Result of the auto-resume step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeOutcome {
    /// Not in auto-resume mode.
    NotRequested,
    /// The save load was issued.
    Loaded(String),
    /// The load failed; the main menu was restored and the player notified.
    Failed(AppError),
}

/// Save name from a full save path: the file stem, with either separator.
#[must_use]
pub fn save_name_from_path(path: &str) -> &str {
    let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match file.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file,
    }
}

/// The agent for one game process.
#[derive(Debug)]
pub struct Agent<S> {
    context: AgentContext,
    load_state: LoadStateMachine,
    orchestrator: RestartOrchestrator<S>,
}

impl Agent<ProcessSpawner> {
    /// Load configuration, start logging and build the agent.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the configuration is invalid or logging
    /// cannot be initialised.
    pub fn bootstrap(config_path: &Path) -> Result<Self> {
        let config = AgentConfig::load_or_default(config_path)?;
        let log_dir = config.log_directory();
        logging::init_tracing(
            log_dir.as_deref(),
            AGENT_LOG_FILE,
            &config.log_filter,
            config.log_format,
        )?;
        info!(
            plugin = PLUGIN_NAME,
            version = env!("CARGO_PKG_VERSION"),
            "plugin loading"
        );

        Ok(Self::from_config(&config, AgentContext::from_env()))
    }

    /// Build the agent from configuration and an already-read context.
    #[must_use]
    pub fn from_config(config: &AgentConfig, context: AgentContext) -> Self {
        let source = LoaderLog::new(config.loader_log_path());
        let builder = LaunchLineBuilder::new(config.loader_executable.clone(), Box::new(source));
        let spawner = ProcessSpawner::new(config.companion_path.clone());
        Self::new(context, RestartOrchestrator::new(builder, spawner))
    }
}

impl<S: CompanionSpawner> Agent<S> {
    /// Agent with explicit parts.
    #[must_use]
    pub fn new(context: AgentContext, orchestrator: RestartOrchestrator<S>) -> Self {
        Self {
            context,
            load_state: LoadStateMachine::new(),
            orchestrator,
        }
    }

    /// The process context.
    #[must_use]
    pub fn context(&self) -> &AgentContext {
        &self.context
    }

    /// The loading-screen state machine.
    #[must_use]
    pub fn load_state(&self) -> &LoadStateMachine {
        &self.load_state
    }

    /// The restart orchestrator.
    #[must_use]
    pub fn orchestrator(&self) -> &RestartOrchestrator<S> {
        &self.orchestrator
    }

    /// Plugin load: skip the intro when this process came from a restart.
    pub fn on_plugin_loaded(&mut self, host: &mut dyn GameHost) {
        if self.context.skips_intro() {
            info!("disabling startup movie");
            host.disable_intro_movie();
        }
    }

    /// Input subsystem ready: subscribe to menu events.
    pub fn on_input_loaded(&mut self, host: &mut dyn GameHost) {
        self.load_state.attach(host);
    }

    /// Game data ready: issue the auto-resume load if requested.
    ///
    /// A failed load is recovered here and never triggers another restart.
    pub fn on_data_loaded(&mut self, host: &mut dyn GameHost) -> ResumeOutcome {
        let Some(save) = self.context.auto_load_save() else {
            return ResumeOutcome::NotRequested;
        };

        match host.load_save(save) {
            Ok(()) => {
                info!(save, "auto-resume load issued");
                ResumeOutcome::Loaded(save.to_owned())
            }
            Err(err) => {
                error!(%err, save, "loading save failed, setting main menu to visible");
                host.set_main_menu_visible(true);
                host.notify(RESUME_FAILED_MESSAGE);
                ResumeOutcome::Failed(err)
            }
        }
    }

    /// Menu opened or closed.
    pub fn on_menu_event(&mut self, event: &MenuEvent, host: &mut dyn GameHost) {
        if !event.opening {
            return;
        }
        match event.menu {
            MenuKind::MainMenu => self.load_state.on_main_menu_open(&self.context, host),
            MenuKind::LoadingMenu => self.load_state.on_loading_menu_open(&self.context, host),
            MenuKind::Other(_) => {}
        }
    }

    /// The game is about to load `save_path`.
    ///
    /// Once a real load happened in this process the load is turned into a
    /// restart. If the companion cannot be spawned the in-process load
    /// goes ahead.
    pub fn on_load_requested(&mut self, save_path: &str, host: &mut dyn GameHost) -> HookDecision {
        if !self.load_state.restart_on_load() {
            return HookDecision::Proceed;
        }
        let save = save_name_from_path(save_path);
        self.restart(Some(save), host)
    }

    /// The fade back to the main menu finished.
    pub fn on_fade_to_main_menu(&mut self, host: &mut dyn GameHost) -> HookDecision {
        self.restart(None, host)
    }

    fn restart(&mut self, save: Option<&str>, host: &mut dyn GameHost) -> HookDecision {
        match self.orchestrator.request_restart(save, host) {
            Ok(_) | Err(AppError::RestartPending(_)) => HookDecision::Restarting,
            Err(err) => {
                warn!(%err, "restart unavailable, continuing in-process");
                HookDecision::Proceed
            }
        }
    }
}
