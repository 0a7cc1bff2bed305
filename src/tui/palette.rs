//! Colors for the two themes. Only presentation reads from here.

use ratatui::style::{Color, Modifier, Style};

use crate::core::conversation::Role;
use crate::core::prefs::Theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub user: Color,
    pub assistant: Color,
    pub error_bg: Color,
    pub error_fg: Color,
    pub highlight_bg: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Black,
                text: Color::Gray,
                muted: Color::DarkGray,
                accent: Color::Yellow,
                user: Color::Cyan,
                assistant: Color::Green,
                error_bg: Color::Red,
                error_fg: Color::White,
                highlight_bg: Color::DarkGray,
            },
            Theme::Light => Self {
                background: Color::White,
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Magenta,
                user: Color::Blue,
                assistant: Color::Rgb(0, 110, 60),
                error_bg: Color::LightRed,
                error_fg: Color::Black,
                highlight_bg: Color::Gray,
            },
        }
    }

    /// Base style for the whole screen.
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn role(&self, role: Role) -> Style {
        let color = match role {
            Role::User => self.user,
            Role::Assistant => self.assistant,
        };
        Style::default().fg(color)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.muted).add_modifier(Modifier::DIM)
    }
}

/// Glyph shown on the theme toggle.
pub fn theme_icon(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "☾",
        Theme::Light => "☀",
    }
}
