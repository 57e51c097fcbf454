//! Capabilities the game host exposes to the agent.

use crate::Result;

/// The host game, as seen by the agent.
///
/// Implemented by the plugin glue against the real game; tests use a
/// recording fake.
pub trait GameHost {
    /// Subscribe the agent to menu open/close events.
    fn add_menu_sink(&mut self);

    /// Remove the agent's menu event subscription.
    fn remove_menu_sink(&mut self);

    /// Show or hide the main menu surface.
    fn set_main_menu_visible(&mut self, visible: bool);

    /// Load the save named `save_name`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ResumeLoad` if the game refuses the load.
    fn load_save(&mut self, save_name: &str) -> Result<()>;

    /// Show a short notification to the player.
    fn notify(&mut self, message: &str);

    /// Set the game's quit flag so it shuts down.
    fn request_quit(&mut self);

    /// Skip the startup movie.
    fn disable_intro_movie(&mut self);
}

/// Menus the agent distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuKind {
    /// The main menu.
    MainMenu,
    /// A loading screen.
    LoadingMenu,
    /// Any other menu, by name.
    Other(String),
}

/// A menu open/close notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEvent {
    /// Menu concerned.
    pub menu: MenuKind,
    /// `true` when the menu opens, `false` when it closes.
    pub opening: bool,
}

impl MenuEvent {
    /// An opening event for `menu`.
    #[must_use]
    pub fn opened(menu: MenuKind) -> Self {
        Self {
            menu,
            opening: true,
        }
    }

    /// A closing event for `menu`.
    #[must_use]
    pub fn closed(menu: MenuKind) -> Self {
        Self {
            menu,
            opening: false,
        }
    }
}
