//! # InputBox Component
//!
//! Holds the draft and edits it.
//!
//! - Typing, paste, backspace/delete, left/right/home/end
//! - Enter emits `Submit` with the whole draft and clears the box
//! - Voice transcripts are appended to the draft, never replacing it
//!
//! The box grows with its content up to `MAX_VISIBLE_LINES`, then scrolls to
//! keep the cursor in view. Clearing the draft shrinks it back to one line.
//!
//! `locked` is a prop: while a reply is pending Enter is ignored and the
//! draft stays put.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;
use crate::voice::join_transcript;

/// Border (2) + padding (2) consumed horizontally.
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders.
const VERTICAL_OVERHEAD: u16 = 2;
/// Content lines shown before the box starts scrolling.
pub const MAX_VISIBLE_LINES: u16 = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed with a non-blank draft.
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    pub buffer: String,
    /// Byte offset into `buffer`, always on a char boundary.
    pos: usize,
    /// Prop: refuse submission while a reply is pending.
    pub locked: bool,
    /// Dimmed note along the bottom border.
    pub hint: Option<&'static str>,
    pub palette: Palette,
}

fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Wrapped line count, counting a trailing newline as an empty line.
fn line_count(text: &str, width: u16) -> u16 {
    if width == 0 || text.is_empty() {
        return 1;
    }
    let lines = textwrap::wrap(text, wrap_options(width));
    let mut count = u16::try_from(lines.len()).unwrap_or(u16::MAX).max(1);
    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        count = count.saturating_add(1);
    }
    count
}

fn prev_boundary(text: &str, pos: usize) -> usize {
    text[..pos].char_indices().next_back().map_or(0, |(i, _)| i)
}

fn next_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len(), |c| pos + c.len_utf8())
}

impl InputBox {
    pub fn new(palette: Palette) -> Self {
        Self {
            buffer: String::new(),
            pos: 0,
            locked: false,
            hint: None,
            palette,
        }
    }

    pub fn cursor(&self) -> usize {
        self.pos
    }

    /// Height needed for the current draft, clamped to the visible maximum.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let width = area_width.saturating_sub(HORIZONTAL_OVERHEAD);
        line_count(&self.buffer, width).min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Append a voice transcript to the draft and move the cursor to the end.
    pub fn append_transcript(&mut self, transcript: &str) {
        self.buffer = join_transcript(&self.buffer, transcript);
        self.pos = self.buffer.len();
    }

    fn clear(&mut self) -> String {
        self.pos = 0;
        std::mem::take(&mut self.buffer)
    }

    /// (line, column) of the cursor inside the wrapped text.
    fn cursor_line_col(&self, width: u16) -> (u16, u16) {
        if width == 0 {
            return (0, 0);
        }
        let before = &self.buffer[..self.pos];
        if before.is_empty() {
            return (0, 0);
        }
        if before.ends_with('\n') {
            return (line_count(before, width) - 1, 0);
        }
        let lines = textwrap::wrap(before, wrap_options(width));
        let last = lines.last().map_or(0, |l| l.width() as u16);
        let line = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_sub(1);
        // A full line pushes the cursor onto the next one.
        if last >= width {
            (line.saturating_add(1), 0)
        } else {
            (line, last)
        }
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        let (line, col) = self.cursor_line_col(width);
        let scroll = line.saturating_sub(MAX_VISIBLE_LINES - 1);

        let title = if self.locked {
            " Waiting for Koa... "
        } else {
            " Message "
        };
        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.palette.base().fg(self.palette.accent))
            .title(title)
            .padding(Padding::horizontal(1));
        if let Some(hint) = self.hint {
            block = block.title_bottom(Line::styled(format!(" {} ", hint), self.palette.dimmed()).right_aligned());
        }

        let input = Paragraph::new(self.buffer.as_str())
            .block(block)
            .style(self.palette.base())
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        frame.render_widget(input, area);

        // Border + padding on the left, border on top.
        frame.set_cursor_position((area.x + 2 + col, area.y + 1 + (line - scroll)));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.pos, *c);
                self.pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.pos, text);
                self.pos += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace if self.pos > 0 => {
                let prev = prev_boundary(&self.buffer, self.pos);
                self.buffer.drain(prev..self.pos);
                self.pos = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete if self.pos < self.buffer.len() => {
                let next = next_boundary(&self.buffer, self.pos);
                self.buffer.drain(self.pos..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft if self.pos > 0 => {
                self.pos = prev_boundary(&self.buffer, self.pos);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorRight if self.pos < self.buffer.len() => {
                self.pos = next_boundary(&self.buffer, self.pos);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorHome => {
                self.pos = self.buffer[..self.pos].rfind('\n').map_or(0, |i| i + 1);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorEnd => {
                self.pos = self.buffer[self.pos..]
                    .find('\n')
                    .map_or(self.buffer.len(), |i| self.pos + i);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Submit => {
                if self.locked || self.buffer.trim().is_empty() {
                    return None;
                }
                Some(InputEvent::Submit(self.clear()))
            }
            _ => None,
        }
    }
}
