//! Loading-screen state machine.
//!
//! The game shows one loading screen while bootstrapping the main menu.
//! Only a second loading screen means a save (or a new game) was actually
//! entered; from then on an in-process load would reuse stale state, so load
//! requests become restarts. Once that point is reached the machine drops
//! its menu subscription.

use tracing::info;

use super::context::AgentContext;
use super::host::GameHost;

/// Progress through the first loads of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No loading screen seen yet.
    AwaitingFirstMenu,
    /// The main-menu bootstrap loading screen has been seen.
    Counting,
    /// A real load happened. Terminal.
    Resumed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Subscription {
    Pending,
    Attached,
    Detached,
}

/// Menu events the machine reacts to, one method per event kind.
pub trait MenuEventSink {
    /// A loading screen opened.
    fn on_loading_menu_open(&mut self, context: &AgentContext, host: &mut dyn GameHost);

    /// The main menu opened.
    fn on_main_menu_open(&mut self, context: &AgentContext, host: &mut dyn GameHost);
}

/// Counts loading screens and hides the main menu while auto-resuming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadStateMachine {
    state: LoadState,
    loading_screens: u32,
    subscription: Subscription,
}

impl Default for LoadStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadStateMachine {
    /// Fresh machine in [`LoadState::AwaitingFirstMenu`], not yet subscribed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: LoadState::AwaitingFirstMenu,
            loading_screens: 0,
            subscription: Subscription::Pending,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Loading screens seen since the process started.
    #[must_use]
    pub fn loading_screens_seen(&self) -> u32 {
        self.loading_screens
    }

    /// Whether a load request should become a restart.
    #[must_use]
    pub fn restart_on_load(&self) -> bool {
        self.loading_screens > 1
    }

    /// Whether menu events are currently delivered to the machine.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.subscription == Subscription::Attached
    }

    /// Whether the subscription was dropped for good.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.subscription == Subscription::Detached
    }

    /// Subscribe to menu events. No-op unless still pending.
    pub fn attach(&mut self, host: &mut dyn GameHost) {
        if self.subscription == Subscription::Pending {
            host.add_menu_sink();
            self.subscription = Subscription::Attached;
        }
    }

    /// Drop the menu subscription. Returns `false` if it was already dropped.
    pub fn detach(&mut self, host: &mut dyn GameHost) -> bool {
        match self.subscription {
            Subscription::Detached => false,
            Subscription::Attached => {
                host.remove_menu_sink();
                self.subscription = Subscription::Detached;
                true
            }
            Subscription::Pending => {
                self.subscription = Subscription::Detached;
                true
            }
        }
    }
}

impl MenuEventSink for LoadStateMachine {
    fn on_loading_menu_open(&mut self, _context: &AgentContext, host: &mut dyn GameHost) {
        if !self.is_attached() {
            return;
        }

        self.loading_screens = self.loading_screens.saturating_add(1);
        if self.restart_on_load() {
            self.state = LoadState::Resumed;
            info!(
                loading_screens = self.loading_screens,
                "game loaded, removing menu event sink"
            );
            self.detach(host);
        } else {
            self.state = LoadState::Counting;
        }
    }

    fn on_main_menu_open(&mut self, context: &AgentContext, host: &mut dyn GameHost) {
        if !self.is_attached() {
            return;
        }

        if context.is_auto_load() {
            host.set_main_menu_visible(false);
        }
    }
}
