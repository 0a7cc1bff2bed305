//! # Header Component
//!
//! Top row: title and status on the left, theme toggle and profile button on
//! the right. Stateless; everything comes in as props.
//!
//! ```text
//! Koa | Koa is typing...                              [☾] [≡]
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::prefs::Theme;
use crate::tui::component::Component;
use crate::tui::palette::{Palette, theme_icon};

const BUTTON_WIDTH: u16 = 3;
const PROFILE_LABEL: &str = "[≡]";

/// Split the header row into `[title, theme toggle, profile button]`.
pub fn header_layout(area: Rect) -> [Rect; 3] {
    let [title, theme, _gap, profile] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(BUTTON_WIDTH),
        Constraint::Length(1),
        Constraint::Length(BUTTON_WIDTH),
    ])
    .areas(area);
    [title, theme, profile]
}

pub struct Header<'a> {
    pub status_message: &'a str,
    pub theme: Theme,
    pub profile_open: bool,
    pub palette: Palette,
}

impl<'a> Header<'a> {
    pub fn title_text(&self) -> String {
        if self.status_message.is_empty() {
            "Koa".to_string()
        } else {
            format!("Koa | {}", self.status_message)
        }
    }
}

impl Component for Header<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [title_area, theme_area, profile_area] = header_layout(area);
        let base = self.palette.base();

        let title = Paragraph::new(Span::styled(
            self.title_text(),
            base.add_modifier(Modifier::BOLD),
        ))
        .style(base);
        frame.render_widget(title, title_area);

        let theme_button = Paragraph::new(Line::from(format!("[{}]", theme_icon(self.theme))))
            .style(base.fg(self.palette.accent));
        frame.render_widget(theme_button, theme_area);

        let mut profile_style = base.fg(self.palette.accent);
        if self.profile_open {
            profile_style = profile_style.bg(self.palette.highlight_bg);
        }
        frame.render_widget(Paragraph::new(PROFILE_LABEL).style(profile_style), profile_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(header: &mut Header) -> String {
        let backend = TestBackend::new(60, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| header.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_buttons_sit_at_right_edge() {
        let [title, theme, profile] = header_layout(Rect::new(0, 0, 60, 1));
        assert_eq!(profile.right(), 60);
        assert_eq!(theme.right() + 1, profile.x);
        assert_eq!(title.x, 0);
    }

    #[test]
    fn test_renders_title_status_and_theme_icon() {
        let mut header = Header {
            status_message: "Koa is typing...",
            theme: Theme::Light,
            profile_open: false,
            palette: Palette::for_theme(Theme::Light),
        };
        let text = render_text(&mut header);
        assert!(text.contains("Koa | Koa is typing..."));
        assert!(text.contains("[☀]"));
        assert!(text.contains("[≡]"));
    }

    #[test]
    fn test_button_labels_fit_their_slots() {
        use unicode_width::UnicodeWidthStr;

        assert_eq!(PROFILE_LABEL.width() as u16, BUTTON_WIDTH);
        for theme in [Theme::Dark, Theme::Light] {
            assert_eq!(format!("[{}]", theme_icon(theme)).width() as u16, BUTTON_WIDTH);
        }
    }

    #[test]
    fn test_title_without_status() {
        let header = Header {
            status_message: "",
            theme: Theme::Dark,
            profile_open: true,
            palette: Palette::for_theme(Theme::Dark),
        };
        assert_eq!(header.title_text(), "Koa");
    }
}
