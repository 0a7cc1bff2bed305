//! # Welcome Component
//!
//! Shown in the chat area while the conversation is empty.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::palette::Palette;

pub struct Welcome {
    pub voice_available: bool,
    pub palette: Palette,
}

impl Welcome {
    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "Hi, I'm Koa.",
                self.palette.base().fg(self.palette.accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("Type a message and press Enter.", self.palette.dimmed())),
        ];
        if self.voice_available {
            lines.push(Line::from(Span::styled("Press F2 to speak instead.", self.palette.dimmed())));
        }
        lines.push(Line::from(Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            self.palette.dimmed(),
        )));
        lines
    }
}

impl Component for Welcome {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        let [text_area] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(self.palette.base());
        frame.render_widget(paragraph, text_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prefs::Theme;

    #[test]
    fn test_voice_hint_only_when_available() {
        let palette = Palette::for_theme(Theme::Dark);
        let with = Welcome { voice_available: true, palette }.lines();
        let without = Welcome { voice_available: false, palette }.lines();
        assert_eq!(with.len(), without.len() + 1);
    }
}
