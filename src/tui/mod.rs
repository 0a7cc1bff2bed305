//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard and mouse events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (typing indicator, listening, a timer armed): draws every
//!   ~80ms so the indicator moves and timers fire close to their deadline.
//! - **Idle**: sleeps up to 500ms and only redraws on events.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
mod palette;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::Rect;
use tokio::task::AbortHandle;

use crate::backend::{ChatBackend, HttpBackend};
use crate::core::action::{Action, Effect, request_reply, update};
use crate::core::config::ResolvedConfig;
use crate::core::menu::HelpRegion;
use crate::core::prefs::PrefStore;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::mic::VOICE_UNAVAILABLE_HINT;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::palette::Palette;
use crate::voice::{self, Recognizer};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    /// Help region under the pointer as of the last mouse move.
    pub hover: Option<HelpRegion>,
}

impl TuiState {
    pub fn new(palette: Palette) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(palette),
            hover: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets us tell Shift+Enter apart; terminals
        // without it ignore the request.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Push App state into the InputBox props.
fn sync_input_props(app: &App, input_box: &mut InputBox) {
    input_box.locked = app.awaiting_reply;
    input_box.palette = Palette::for_theme(app.theme);
    input_box.hint = (!app.voice_available()).then_some(VOICE_UNAVAILABLE_HINT);
}

/// Carries out effects and keeps track of the background tasks they start.
struct Runner {
    tx: mpsc::Sender<Action>,
    store: Option<PrefStore>,
    voice_task: Option<AbortHandle>,
}

impl Runner {
    /// Translate one terminal event into actions and dispatch them.
    /// Returns true when the app should quit.
    fn handle_event(&mut self, app: &mut App, tui: &mut TuiState, event: TuiEvent, area: Rect) -> bool {
        // Events are drained in batches; an earlier event may have started a request.
        sync_input_props(app, &mut tui.input_box);

        let actions = match event {
            TuiEvent::Resize => return false,
            TuiEvent::ForceQuit => vec![Action::Quit],
            TuiEvent::Escape => vec![Action::CloseMenus],
            TuiEvent::ToggleTheme => vec![Action::ToggleTheme],
            TuiEvent::ToggleProfileMenu => vec![Action::ToggleProfileMenu],
            TuiEvent::ToggleHelp => vec![Action::ToggleHelpSubmenu],
            TuiEvent::ToggleVoice => vec![Action::ToggleVoice],
            TuiEvent::MouseMove(col, row) => {
                let regions = ui::regions(area, app, ui::input_height(area, &tui.input_box));
                let hover = ui::hover_region(&regions, col, row);
                let old = std::mem::replace(&mut tui.hover, hover);
                ui::hover_transitions(old, hover, Instant::now())
            }
            TuiEvent::MouseClick(col, row) => {
                let regions = ui::regions(area, app, ui::input_height(area, &tui.input_box));
                ui::click_actions(&regions, col, row)
            }
            TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown => {
                tui.message_list.handle_event(&event);
                return false;
            }
            _ => match tui.input_box.handle_event(&event) {
                Some(InputEvent::Submit(text)) => {
                    tui.message_list.stick_to_bottom = true;
                    vec![Action::Submit {
                        text,
                        at: Instant::now(),
                    }]
                }
                Some(InputEvent::ContentChanged) | None => return false,
            },
        };

        let mut quit = false;
        for action in actions {
            quit |= self.dispatch(app, tui, action);
        }
        quit
    }

    /// Feed an action to `update` and perform whatever it asks for.
    /// Returns true when the app should quit.
    fn dispatch(&mut self, app: &mut App, tui: &mut TuiState, action: Action) -> bool {
        let mut pending = vec![action];
        while let Some(action) = pending.pop() {
            match update(app, action) {
                Effect::None => {}
                Effect::Quit => return true,
                Effect::SpawnRequest(text) => spawn_request(app.backend.clone(), text, self.tx.clone()),
                Effect::SaveTheme(theme) => {
                    if let Some(store) = &self.store
                        && let Err(e) = store.save_theme(theme)
                    {
                        warn!("Failed to save theme to {}: {}", store.path().display(), e);
                    }
                }
                Effect::StartListening => {
                    if self.voice_task.as_ref().is_some_and(|h| !h.is_finished()) {
                        debug!("Voice session already running");
                        continue;
                    }
                    if let Some(recognizer) = app.recognizer.clone() {
                        self.voice_task = Some(spawn_listen(recognizer, self.tx.clone()));
                    }
                }
                Effect::StopListening => {
                    if let Some(handle) = self.voice_task.take() {
                        info!("Stopping voice session");
                        handle.abort();
                    }
                    pending.push(Action::VoiceEnded);
                }
                Effect::AppendToDraft(transcript) => tui.input_box.append_transcript(&transcript),
            }
        }
        false
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend: Arc<dyn ChatBackend> = Arc::new(HttpBackend::new(config.base_url.clone()));
    let store = PrefStore::in_home();
    if store.is_none() {
        warn!("No home directory; theme preference will not be saved");
    }
    let theme = config
        .theme_override
        .or_else(|| store.as_ref().map(PrefStore::load_theme))
        .unwrap_or_default();

    let mut app = App::new(backend, theme).with_recognizer(voice::detect(&config));
    let mut tui = TuiState::new(Palette::for_theme(app.theme));

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut runner = Runner {
        tx,
        store,
        voice_task: None,
    };

    let start_time = Instant::now();
    let mut needs_redraw = true;

    loop {
        sync_input_props(&app, &mut tui.input_box);

        let animating = app.awaiting_reply || app.listening || app.has_pending_timers();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 4.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout)?;
        if first_event.is_some() {
            needs_redraw = true;
        }

        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let area = terminal.get_frame().area();
            if runner.handle_event(&mut app, &mut tui, event, area) {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }

        // Actions from background tasks (replies, recognizer)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if runner.dispatch(&mut app, &mut tui, action) {
                should_quit = true;
            }
        }
        if should_quit {
            break;
        }

        if runner.dispatch(&mut app, &mut tui, Action::Tick(Instant::now())) {
            break;
        }
    }

    if let Some(handle) = runner.voice_task.take() {
        handle.abort();
    }
    ratatui::restore();
    info!("Koa shutting down");
    Ok(())
}

fn spawn_request(backend: Arc<dyn ChatBackend>, text: String, tx: mpsc::Sender<Action>) {
    info!("Spawning chat request via {}", backend.name());
    tokio::spawn(async move {
        let action = request_reply(backend.as_ref(), &text).await;
        if tx.send(action).is_err() {
            warn!("Failed to deliver chat reply: receiver dropped");
        }
    });
}

/// One recognizer session: started, then a transcript or failure, then ended.
fn spawn_listen(recognizer: Arc<dyn Recognizer>, tx: mpsc::Sender<Action>) -> AbortHandle {
    info!("Starting voice session via {}", recognizer.name());
    let handle = tokio::spawn(async move {
        if tx.send(Action::VoiceStarted).is_err() {
            warn!("Failed to deliver VoiceStarted: receiver dropped");
            return;
        }
        let outcome = match recognizer.listen().await {
            Ok(transcript) => Action::TranscriptReceived(transcript),
            Err(e) => Action::VoiceFailed(e.to_string()),
        };
        if tx.send(outcome).is_err() {
            warn!("Failed to deliver voice result: receiver dropped");
            return;
        }
        if tx.send(Action::VoiceEnded).is_err() {
            warn!("Failed to deliver VoiceEnded: receiver dropped");
        }
    });
    handle.abort_handle()
}
