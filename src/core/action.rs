//! # Actions
//!
//! Everything that can happen in Koa becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! The backend answers? That's `Action::ReplyReceived(text)`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing the I/O the caller must perform.
//! No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Timers are deadlines kept in state; `Action::Tick(now)` fires the ones
//! that are due.

use std::time::Instant;

use log::{debug, info, warn};

use crate::backend::ChatBackend;
use crate::core::menu::{HelpRegion, MenuItem};
use crate::core::prefs::Theme;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Send the draft. `at` stamps the error banner's dismissal timer.
    Submit { text: String, at: Instant },
    ReplyReceived(String),
    /// Request failed; the string is log detail only.
    RequestFailed(String),

    ToggleTheme,
    ToggleProfileMenu,
    /// Escape or a click outside the dropdown.
    CloseMenus,
    PointerEnter(HelpRegion),
    PointerLeave(HelpRegion, Instant),
    ToggleHelpSubmenu,
    MenuItemSelected(MenuItem),
    HelpEntrySelected(&'static str),

    ToggleVoice,
    VoiceStarted,
    TranscriptReceived(String),
    VoiceFailed(String),
    VoiceEnded,

    Tick(Instant),
    Quit,
}

/// Side effects requested by `update()`, carried out by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Issue exactly one request carrying this text.
    SpawnRequest(String),
    SaveTheme(Theme),
    StartListening,
    StopListening,
    AppendToDraft(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit { text, at } => {
            let text = text.trim();
            if text.is_empty() {
                return Effect::None;
            }
            if app.awaiting_reply {
                debug!("Submit ignored: reply still pending");
                return Effect::None;
            }

            app.conversation.push_user(text);
            app.error_banner.hide(at);
            app.awaiting_reply = true;
            app.status_message = String::from("Koa is typing...");
            info!("Message submitted ({} bytes)", text.len());
            Effect::SpawnRequest(text.to_string())
        }

        Action::ReplyReceived(reply) => {
            app.awaiting_reply = false;
            app.status_message.clear();
            app.conversation.push_assistant(reply);
            Effect::None
        }

        Action::RequestFailed(detail) => {
            warn!("Chat request failed: {}", detail);
            app.awaiting_reply = false;
            app.status_message.clear();
            app.error_banner.show();
            Effect::None
        }

        Action::ToggleTheme => {
            app.theme = app.theme.toggled();
            info!("Theme switched to {}", app.theme.label());
            Effect::SaveTheme(app.theme)
        }

        Action::ToggleProfileMenu => {
            app.menu.toggle_profile();
            Effect::None
        }

        Action::CloseMenus => {
            app.menu.close_all();
            Effect::None
        }

        Action::PointerEnter(region) => {
            app.menu.pointer_enter(region);
            Effect::None
        }

        Action::PointerLeave(region, at) => {
            app.menu.pointer_leave(region, at);
            Effect::None
        }

        Action::ToggleHelpSubmenu => {
            app.menu.toggle_help();
            Effect::None
        }

        Action::MenuItemSelected(MenuItem::Help) => {
            app.menu.toggle_help();
            Effect::None
        }

        Action::MenuItemSelected(item) => {
            info!("Clicked: {}", item.label());
            Effect::None
        }

        Action::HelpEntrySelected(entry) => {
            info!("Clicked: {}", entry);
            Effect::None
        }

        Action::ToggleVoice => {
            if !app.voice_available() {
                debug!("Voice toggle ignored: no recognizer");
                return Effect::None;
            }
            if app.listening {
                Effect::StopListening
            } else {
                Effect::StartListening
            }
        }

        Action::VoiceStarted => {
            app.listening = true;
            Effect::None
        }

        Action::TranscriptReceived(transcript) => Effect::AppendToDraft(transcript),

        Action::VoiceFailed(detail) => {
            warn!("Speech recognition error: {}", detail);
            app.listening = false;
            Effect::None
        }

        Action::VoiceEnded => {
            app.listening = false;
            Effect::None
        }

        Action::Tick(now) => {
            if app.menu.tick(now) {
                debug!("Help submenu closed by timer");
            }
            if app.error_banner.tick(now) {
                debug!("Error banner removal timer fired");
            }
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

/// Run one request against the backend and turn the outcome into an action.
pub async fn request_reply(backend: &dyn ChatBackend, text: &str) -> Action {
    match backend.send(text).await {
        Ok(reply) => Action::ReplyReceived(reply),
        Err(e) => Action::RequestFailed(e.to_string()),
    }
}
