//! # Error Banner Component
//!
//! Generic failure notice above the input. While the banner is hidden but its
//! removal timer hasn't fired yet, the row stays reserved and renders blank,
//! the terminal's stand-in for a fade-out.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::banner::{BANNER_TEXT, ErrorBanner};
use crate::tui::component::Component;
use crate::tui::palette::Palette;

/// Rows reserved while the banner is part of the layout.
pub const BANNER_HEIGHT: u16 = 3;

pub struct ErrorBannerView<'a> {
    pub banner: &'a ErrorBanner,
    pub palette: Palette,
}

impl Component for ErrorBannerView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.banner.in_layout() {
            return;
        }
        if !self.banner.is_visible() {
            frame.render_widget(Paragraph::new("").style(self.palette.base()), area);
            return;
        }

        let style = self
            .palette
            .base()
            .fg(self.palette.error_fg)
            .bg(self.palette.error_bg);
        let banner = Paragraph::new(BANNER_TEXT)
            .alignment(Alignment::Center)
            .style(style.add_modifier(Modifier::BOLD))
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(style),
            );
        frame.render_widget(banner, area);
    }
}
