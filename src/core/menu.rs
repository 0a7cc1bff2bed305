//! # Profile Menu
//!
//! The profile dropdown and its help submenu.
//!
//! ```text
//! profile menu ──┬── Settings
//!                ├── Shortcuts
//!                └── Help ──► help submenu
//! ```
//!
//! The submenu is a child of the dropdown: it can only be open while the
//! dropdown is open, and every path that closes the dropdown closes it too.
//!
//! Hovering opens the submenu immediately. Leaving arms a short close timer
//! that re-entering either region disarms, so moving the pointer across the
//! gap between the help entry and the submenu doesn't make it flicker.

use std::time::{Duration, Instant};

use log::debug;

/// How long the submenu stays open after the pointer leaves it.
pub const HELP_CLOSE_DELAY: Duration = Duration::from_millis(200);

/// Regions that keep the help submenu alive while hovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpRegion {
    /// The "Help" entry inside the dropdown.
    Trigger,
    /// The submenu itself.
    Submenu,
}

/// Entries of the profile dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Settings,
    Shortcuts,
    Help,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::Settings, MenuItem::Shortcuts, MenuItem::Help];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Settings => "Settings",
            MenuItem::Shortcuts => "Shortcuts",
            MenuItem::Help => "Help",
        }
    }
}

/// Entries of the help submenu.
pub const HELP_ENTRIES: [&str; 3] = ["Documentation", "Keyboard shortcuts", "Report an issue"];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MenuState {
    profile_open: bool,
    help_open: bool,
    help_close_at: Option<Instant>,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_profile_open(&self) -> bool {
        self.profile_open
    }

    pub fn is_help_open(&self) -> bool {
        self.help_open
    }

    /// Whether a submenu close is armed and waiting for its deadline.
    pub fn help_close_pending(&self) -> bool {
        self.help_close_at.is_some()
    }

    pub fn toggle_profile(&mut self) {
        if self.profile_open {
            self.close_all();
        } else {
            self.profile_open = true;
            debug!("Profile menu opened");
        }
    }

    /// Close the dropdown and the submenu unconditionally.
    pub fn close_all(&mut self) {
        self.profile_open = false;
        self.help_open = false;
        self.help_close_at = None;
        debug!("Menus closed");
    }

    pub fn pointer_enter(&mut self, region: HelpRegion) {
        if !self.profile_open {
            return;
        }
        self.help_close_at = None;
        if !self.help_open {
            debug!("Help submenu opened by hover ({:?})", region);
        }
        self.help_open = true;
    }

    pub fn pointer_leave(&mut self, region: HelpRegion, now: Instant) {
        if !self.profile_open {
            return;
        }
        debug!("Pointer left {:?}, closing help submenu in {:?}", region, HELP_CLOSE_DELAY);
        self.help_close_at = Some(now + HELP_CLOSE_DELAY);
    }

    /// Click/keyboard toggle for the submenu. Leaves any armed hover timer alone.
    pub fn toggle_help(&mut self) {
        if !self.profile_open {
            return;
        }
        self.help_open = !self.help_open;
    }

    /// Fire the close timer if its deadline has passed. Returns true if it fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.help_close_at {
            Some(at) if now >= at => {
                self.help_close_at = None;
                self.help_open = false;
                true
            }
            _ => false,
        }
    }
}
