//! Screen layout, drawing, and mouse hit-testing.
//!
//! ```text
//! ┌ header ─────────────────────────────── [☾] [≡] ┐
//! │ chat (welcome or messages)       ┌ dropdown ┐   │
//! │                                  └──────────┘   │
//! │ error banner (while in layout)                  │
//! │ input box                                 │ mic │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! `regions` is the single source of truth for where things are. Drawing and
//! click/hover translation both go through it.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::widgets::Block;

use crate::core::action::Action;
use crate::core::menu::{HelpRegion, MenuItem};
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::dropdown::{dropdown_rect, entry_rects, item_rects, submenu_rect};
use crate::tui::components::error_banner::BANNER_HEIGHT;
use crate::tui::components::header::header_layout;
use crate::tui::components::mic::MIC_WIDTH;
use crate::tui::components::{
    ErrorBannerView, Header, HelpSubmenu, InputBox, MessageList, MicButton, MicState,
    ProfileDropdown, Welcome,
};
use crate::tui::palette::Palette;

#[derive(Debug, Clone, PartialEq)]
pub struct Regions {
    pub header: Rect,
    pub theme_toggle: Rect,
    pub profile_button: Rect,
    pub chat: Rect,
    pub banner: Option<Rect>,
    pub input: Rect,
    pub mic: Rect,
    /// Present only while the profile menu is open.
    pub dropdown: Option<Rect>,
    pub menu_items: Vec<(MenuItem, Rect)>,
    /// Present only while the help submenu is open.
    pub help_submenu: Option<Rect>,
    pub help_entries: Vec<(&'static str, Rect)>,
}

/// Height the input row needs for the current draft.
pub fn input_height(area: Rect, input_box: &InputBox) -> u16 {
    input_box.calculate_height(area.width.saturating_sub(MIC_WIDTH))
}

pub fn regions(area: Rect, app: &App, input_height: u16) -> Regions {
    use Constraint::{Length, Min};

    let banner_height = if app.error_banner.in_layout() {
        BANNER_HEIGHT
    } else {
        0
    };
    let [header, chat, banner, input_row] = Layout::vertical([
        Length(1),
        Min(0),
        Length(banner_height),
        Length(input_height),
    ])
    .areas(area);
    let [input, mic] = Layout::horizontal([Min(0), Length(MIC_WIDTH)]).areas(input_row);
    let [_title, theme_toggle, profile_button] = header_layout(header);

    let dropdown = app
        .menu
        .is_profile_open()
        .then(|| dropdown_rect(profile_button, area));
    let menu_items = dropdown.map(item_rects).unwrap_or_default();

    let help_row = menu_items
        .iter()
        .find(|(item, _)| *item == MenuItem::Help)
        .map(|(_, rect)| *rect);
    let help_submenu = match (dropdown, help_row) {
        (Some(dropdown), Some(help_row)) if app.menu.is_help_open() => {
            Some(submenu_rect(dropdown, help_row, area))
        }
        _ => None,
    };
    let help_entries = help_submenu.map(entry_rects).unwrap_or_default();

    Regions {
        header,
        theme_toggle,
        profile_button,
        chat,
        banner: app.error_banner.in_layout().then_some(banner),
        input,
        mic,
        dropdown,
        menu_items,
        help_submenu,
        help_entries,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let area = frame.area();
    let palette = Palette::for_theme(app.theme);
    frame.render_widget(Block::default().style(palette.base()), area);

    let regions = regions(area, app, input_height(area, &tui.input_box));

    Header {
        status_message: &app.status_message,
        theme: app.theme,
        profile_open: app.menu.is_profile_open(),
        palette,
    }
    .render(frame, regions.header);

    if app.conversation.is_empty() && !app.awaiting_reply {
        Welcome {
            voice_available: app.voice_available(),
            palette,
        }
        .render(frame, regions.chat);
    } else {
        MessageList {
            state: &mut tui.message_list,
            conversation: &app.conversation,
            awaiting_reply: app.awaiting_reply,
            spinner_frame,
            palette,
        }
        .render(frame, regions.chat);
    }

    if let Some(banner_area) = regions.banner {
        ErrorBannerView {
            banner: &app.error_banner,
            palette,
        }
        .render(frame, banner_area);
    }

    tui.input_box.render(frame, regions.input);
    MicButton {
        state: MicState::from_app(app.voice_available(), app.listening),
        palette,
    }
    .render(frame, regions.mic);

    if let Some(dropdown) = regions.dropdown {
        ProfileDropdown {
            area: dropdown,
            help_open: app.menu.is_help_open(),
            palette,
        }
        .render(frame, area);
    }
    if let Some(submenu) = regions.help_submenu {
        HelpSubmenu {
            area: submenu,
            palette,
        }
        .render(frame, area);
    }
}

/// Translate a left click into actions, in the order they should be applied.
///
/// A click outside the open menus closes them first and then still reaches
/// whatever it landed on. Clicking the profile button only toggles.
pub fn click_actions(regions: &Regions, col: u16, row: u16) -> Vec<Action> {
    let pos = Position::new(col, row);
    let hits = |rect: Option<Rect>| rect.is_some_and(|r| r.contains(pos));
    let in_menu = hits(regions.dropdown) || hits(regions.help_submenu);

    let mut actions = Vec::new();
    if regions.dropdown.is_some() && !in_menu && !regions.profile_button.contains(pos) {
        actions.push(Action::CloseMenus);
    }

    if let Some((entry, _)) = regions.help_entries.iter().find(|(_, r)| r.contains(pos)) {
        actions.push(Action::HelpEntrySelected(*entry));
    } else if let Some((item, _)) = regions.menu_items.iter().find(|(_, r)| r.contains(pos)) {
        actions.push(Action::MenuItemSelected(*item));
    } else if in_menu {
        // Border of an overlay.
    } else if regions.theme_toggle.contains(pos) {
        actions.push(Action::ToggleTheme);
    } else if regions.profile_button.contains(pos) {
        actions.push(Action::ToggleProfileMenu);
    } else if regions.mic.contains(pos) {
        actions.push(Action::ToggleVoice);
    }
    actions
}

/// Which help-keeping region the pointer is over, if any.
pub fn hover_region(regions: &Regions, col: u16, row: u16) -> Option<HelpRegion> {
    let pos = Position::new(col, row);
    if regions.help_submenu.is_some_and(|r| r.contains(pos)) {
        return Some(HelpRegion::Submenu);
    }
    regions
        .menu_items
        .iter()
        .any(|(item, r)| *item == MenuItem::Help && r.contains(pos))
        .then_some(HelpRegion::Trigger)
}

/// Enter/leave actions for a pointer moving from `old` to `new`.
pub fn hover_transitions(
    old: Option<HelpRegion>,
    new: Option<HelpRegion>,
    now: Instant,
) -> Vec<Action> {
    if old == new {
        return Vec::new();
    }
    let mut actions = Vec::new();
    if let Some(region) = old {
        actions.push(Action::PointerLeave(region, now));
    }
    if let Some(region) = new {
        actions.push(Action::PointerEnter(region));
    }
    actions
}
