//! # Mic Button
//!
//! Sits to the right of the input box. Three looks: idle, listening (red dot),
//! and disabled when no recognizer is configured.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::Component;
use crate::tui::palette::Palette;

/// Columns the mic column takes, borders included.
pub const MIC_WIDTH: u16 = 5;

pub const VOICE_UNAVAILABLE_HINT: &str = "Voice input unavailable (set [voice] command)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicState {
    Idle,
    Listening,
    Disabled,
}

impl MicState {
    pub fn from_app(available: bool, listening: bool) -> Self {
        match (available, listening) {
            (false, _) => MicState::Disabled,
            (true, true) => MicState::Listening,
            (true, false) => MicState::Idle,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            MicState::Idle => "🎤",
            MicState::Listening => "●",
            MicState::Disabled => "✕",
        }
    }
}

pub struct MicButton {
    pub state: MicState,
    pub palette: Palette,
}

impl Component for MicButton {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let base = self.palette.base();
        let (glyph_style, border_style) = match self.state {
            MicState::Idle => (base.fg(self.palette.accent), base.fg(self.palette.accent)),
            MicState::Listening => (
                base.fg(Color::Red).add_modifier(Modifier::BOLD),
                base.fg(Color::Red),
            ),
            MicState::Disabled => (self.palette.dimmed(), self.palette.dimmed()),
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Center the glyph vertically inside the box.
        let row = Rect::new(inner.x, inner.y + inner.height.saturating_sub(1) / 2, inner.width, inner.height.min(1));
        frame.render_widget(
            Paragraph::new(self.state.glyph())
                .alignment(Alignment::Center)
                .style(glyph_style),
            row,
        );
    }
}
