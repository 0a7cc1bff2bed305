//! # Application State
//!
//! Core business state for Koa. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn ChatBackend>         // reply endpoint
//! ├── recognizer: Option<Arc<dyn Recognizer>> // None = voice disabled
//! ├── conversation: Conversation            // append-only message log
//! ├── awaiting_reply: bool                  // request in flight
//! ├── error_banner: ErrorBanner             // generic failure banner
//! ├── theme: Theme                          // dark / light
//! ├── menu: MenuState                       // profile menu + help submenu
//! ├── listening: bool                       // recognizer session active
//! └── status_message: String                // header status text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::backend::ChatBackend;
use crate::core::banner::ErrorBanner;
use crate::core::conversation::Conversation;
use crate::core::menu::MenuState;
use crate::core::prefs::Theme;
use crate::voice::Recognizer;

pub struct App {
    pub backend: Arc<dyn ChatBackend>,
    pub recognizer: Option<Arc<dyn Recognizer>>,
    pub conversation: Conversation,
    /// True between sending a message and its reply (or failure).
    pub awaiting_reply: bool,
    pub error_banner: ErrorBanner,
    pub theme: Theme,
    pub menu: MenuState,
    pub listening: bool,
    pub status_message: String,
}

impl App {
    pub fn new(backend: Arc<dyn ChatBackend>, theme: Theme) -> Self {
        Self {
            backend,
            recognizer: None,
            conversation: Conversation::new(),
            awaiting_reply: false,
            error_banner: ErrorBanner::new(),
            theme,
            menu: MenuState::new(),
            listening: false,
            status_message: String::new(),
        }
    }

    pub fn with_recognizer(mut self, recognizer: Option<Arc<dyn Recognizer>>) -> Self {
        self.recognizer = recognizer;
        self
    }

    pub fn voice_available(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Whether any timer is armed, so the event loop knows to keep ticking.
    pub fn has_pending_timers(&self) -> bool {
        self.menu.help_close_pending() || self.error_banner.removal_pending()
    }
}
