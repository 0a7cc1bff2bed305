//! # MessageList Component
//!
//! Scrollable view of the conversation plus the typing indicator.
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the conversation (props).
//!
//! The log is append-only and messages never change, so measured heights stay
//! valid until the width changes; only new messages get measured.

use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::Modifier;
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::conversation::{Conversation, Role};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageView;
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

/// Rows used by the typing indicator bubble.
pub const TYPING_INDICATOR_HEIGHT: u16 = 3;

/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Measured height per message, in log order.
    pub heights: Vec<u16>,
    /// Running totals of `heights`, saturating at `u16::MAX`.
    pub prefix_heights: Vec<u16>,
    measured_width: u16,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            measured_width: 0,
            viewport_height: 0,
        }
    }

    /// Measure any messages not yet in the cache.
    pub fn measure(&mut self, conversation: &Conversation, width: u16) {
        if width != self.measured_width {
            self.heights.clear();
            self.prefix_heights.clear();
            self.measured_width = width;
        }
        for message in conversation.messages().iter().skip(self.heights.len()) {
            let height = MessageView::calculate_height(message, width);
            self.heights.push(height);
            self.prefix_heights
                .push(self.content_height().saturating_add(height));
        }
    }

    fn content_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Messages overlapping the viewport, padded by half a screen each way.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }

    fn clamp_scroll(&mut self, total: u16) {
        let max_y = total.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Re-engage auto-scroll once the user scrolls back to the bottom.
    fn repin_if_at_bottom(&mut self) {
        let max_y = self.content_height().saturating_sub(self.viewport_height);
        if self.scroll_state.offset().y >= max_y {
            self.stick_to_bottom = true;
        }
    }
}

pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub conversation: &'a Conversation,
    pub awaiting_reply: bool,
    pub spinner_frame: usize,
    pub palette: Palette,
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // scrollbar column
        self.state.measure(self.conversation, content_width);
        self.state.viewport_height = area.height;

        let indicator_height = if self.awaiting_reply {
            TYPING_INDICATOR_HEIGHT
        } else {
            0
        };
        let total_height = self.state.content_height().saturating_add(indicator_height);

        if !self.state.stick_to_bottom {
            self.state.clamp_scroll(total_height);
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }
        let scroll_offset = if self.state.stick_to_bottom {
            total_height.saturating_sub(area.height)
        } else {
            self.state.scroll_state.offset().y
        };
        let visible = self.state.visible_range(scroll_offset, area.height);

        let mut y_offset = match visible.start {
            0 => 0,
            i => self.state.prefix_heights[i - 1],
        };
        for i in visible {
            let height = self.state.heights[i];
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(MessageView::new(&self.conversation.messages()[i], self.palette), rect);
            y_offset = y_offset.saturating_add(height);
        }

        if self.awaiting_reply {
            let rect = Rect::new(
                0,
                self.state.content_height(),
                content_width.min(20),
                TYPING_INDICATOR_HEIGHT,
            );
            scroll_view.render_widget(
                TypingIndicator {
                    frame: self.spinner_frame,
                    palette: self.palette,
                },
                rect,
            );
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Three dots that take turns lighting up while a reply is pending.
pub struct TypingIndicator {
    pub frame: usize,
    pub palette: Palette,
}

impl TypingIndicator {
    pub fn dots(frame: usize) -> String {
        let lit = frame % 3;
        (0..3)
            .map(|i| if i == lit { "●" } else { "○" })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Widget for TypingIndicator {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = self.palette.role(Role::Assistant);
        let block = Block::bordered()
            .title(format!(" {} ", Role::Assistant.label()))
            .border_type(BorderType::Rounded)
            .border_style(style.add_modifier(Modifier::DIM));
        Paragraph::new(Self::dots(self.frame))
            .style(style)
            .block(block)
            .render(area, buf);
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}
