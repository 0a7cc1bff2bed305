use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::conversation::{Message, Role};
use crate::tui::component::Component;
use crate::tui::palette::Palette;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
pub const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
pub const VERTICAL_OVERHEAD: u16 = 2;

/// Renders one chat message as a bordered bubble titled with the speaker.
///
/// Transient: built each frame from a borrowed `Message`.
#[derive(Clone, Copy)]
pub struct MessageView<'a> {
    pub message: &'a Message,
    pub palette: Palette,
}

impl<'a> MessageView<'a> {
    pub fn new(message: &'a Message, palette: Palette) -> Self {
        Self { message, palette }
    }

    /// Rendered height at the given width, computed with the same wrapping
    /// rules `Paragraph` uses so the scroll view can be sized up front.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        let content = message.text().trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options).len().max(1);
        u16::try_from(lines)
            .unwrap_or(u16::MAX)
            .saturating_add(VERTICAL_OVERHEAD)
    }

    fn title(&self) -> String {
        format!(
            " {} · {} ",
            self.message.role().label(),
            self.message.sent_at().format("%H:%M")
        )
    }
}

impl Widget for MessageView<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = self.palette.role(self.message.role());
        let border_style = match self.message.role() {
            Role::User => style.add_modifier(Modifier::DIM),
            Role::Assistant => style,
        };

        let block = Block::bordered()
            .title(self.title())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style.add_modifier(Modifier::BOLD))
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.message.text().trim())
            .style(self.palette.base())
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl Component for MessageView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prefs::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn user(text: &str) -> Message {
        Message::new(Role::User, text)
    }

    #[test]
    fn calculate_height_empty_content_returns_border_height() {
        assert_eq!(MessageView::calculate_height(&user("  \n\t "), 80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_too_narrow_returns_minimum() {
        assert_eq!(MessageView::calculate_height(&user("Hello"), HORIZONTAL_OVERHEAD), 1);
    }

    #[test]
    fn calculate_height_wraps_at_width_boundary() {
        // width 9 → content width 5: "Hello" | "world"
        assert_eq!(
            MessageView::calculate_height(&user("Hello world"), 9),
            2 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_breaks_long_words() {
        // width 8 → content width 4: "abcd" | "efgh" | "ij"
        assert_eq!(
            MessageView::calculate_height(&user("abcdefghij"), 8),
            3 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_saturates_for_huge_text() {
        let huge = "x\n".repeat(70_000);
        assert_eq!(MessageView::calculate_height(&user(&huge), 40), u16::MAX);
    }

    #[test]
    fn render_labels_speaker() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let msg = Message::new(Role::Assistant, "Hello");
        let mut view = MessageView::new(&msg, Palette::for_theme(Theme::Dark));

        terminal
            .draw(|f| Component::render(&mut view, f, f.area()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Koa ·"));
        assert!(text.contains("Hello"));
    }
}
