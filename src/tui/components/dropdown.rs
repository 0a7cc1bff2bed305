//! # Profile Dropdown
//!
//! Overlay hanging from the profile button, with the help submenu opening to
//! its left. Both are drawn over the chat with `Clear` so nothing bleeds
//! through.
//!
//! ```text
//!                       ┌────────────────────┐┌──────────────┐
//!                       │ Documentation      ││ Settings     │
//!                       │ Keyboard shortcuts ││ Shortcuts    │
//!                       │ Report an issue    ││ Help       ◂ │
//!                       └────────────────────┘└──────────────┘
//! ```
//!
//! The layout helpers here are shared with hit-testing in `ui.rs`, so what is
//! drawn and what is clickable always agree.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::core::menu::{HELP_ENTRIES, MenuItem};
use crate::tui::component::Component;
use crate::tui::palette::Palette;

pub const DROPDOWN_WIDTH: u16 = 16;
pub const SUBMENU_WIDTH: u16 = 22;

/// Dropdown box, right-aligned under the profile button and kept inside `screen`.
pub fn dropdown_rect(profile_button: Rect, screen: Rect) -> Rect {
    let height = MenuItem::ALL.len() as u16 + 2;
    let x = profile_button
        .right()
        .saturating_sub(DROPDOWN_WIDTH)
        .max(screen.x);
    let y = profile_button.bottom();
    Rect::new(x, y, DROPDOWN_WIDTH, height).intersection(screen)
}

/// One row per entry inside a bordered box.
fn rows(inner_of: Rect, count: usize) -> Vec<Rect> {
    let inner = Rect::new(
        inner_of.x + 1,
        inner_of.y + 1,
        inner_of.width.saturating_sub(2),
        inner_of.height.saturating_sub(2),
    );
    (0..count as u16)
        .filter(|i| *i < inner.height)
        .map(|i| Rect::new(inner.x, inner.y + i, inner.width, 1))
        .collect()
}

pub fn item_rects(dropdown: Rect) -> Vec<(MenuItem, Rect)> {
    MenuItem::ALL
        .into_iter()
        .zip(rows(dropdown, MenuItem::ALL.len()))
        .collect()
}

/// Submenu box, flush against the dropdown's left edge with its first entry
/// level with the help row.
pub fn submenu_rect(dropdown: Rect, help_row: Rect, screen: Rect) -> Rect {
    let height = HELP_ENTRIES.len() as u16 + 2;
    let x = dropdown.x.saturating_sub(SUBMENU_WIDTH).max(screen.x);
    let y = help_row
        .y
        .saturating_sub(1)
        .min(screen.bottom().saturating_sub(height))
        .max(screen.y);
    Rect::new(x, y, SUBMENU_WIDTH.min(dropdown.x - x), height).intersection(screen)
}

pub fn entry_rects(submenu: Rect) -> Vec<(&'static str, Rect)> {
    HELP_ENTRIES
        .into_iter()
        .zip(rows(submenu, HELP_ENTRIES.len()))
        .collect()
}

fn menu_block(palette: Palette) -> Block<'static> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(palette.base().fg(palette.accent))
        .style(palette.base())
}

pub struct ProfileDropdown {
    pub area: Rect,
    pub help_open: bool,
    pub palette: Palette,
}

impl Component for ProfileDropdown {
    fn render(&mut self, frame: &mut Frame, _area: Rect) {
        frame.render_widget(Clear, self.area);
        frame.render_widget(menu_block(self.palette), self.area);

        for (item, row) in item_rects(self.area) {
            let mut style = self.palette.base();
            let label = if item == MenuItem::Help {
                if self.help_open {
                    style = style.bg(self.palette.highlight_bg).add_modifier(Modifier::BOLD);
                }
                format!(" ◂ {}", item.label())
            } else {
                format!("   {}", item.label())
            };
            frame.render_widget(Paragraph::new(Line::from(label)).style(style), row);
        }
    }
}

pub struct HelpSubmenu {
    pub area: Rect,
    pub palette: Palette,
}

impl Component for HelpSubmenu {
    fn render(&mut self, frame: &mut Frame, _area: Rect) {
        frame.render_widget(Clear, self.area);
        frame.render_widget(menu_block(self.palette), self.area);

        for (entry, row) in entry_rects(self.area) {
            frame.render_widget(
                Paragraph::new(format!(" {}", entry)).style(self.palette.base()),
                row,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::new(0, 0, 80, 24);

    fn profile_button() -> Rect {
        Rect::new(77, 0, 3, 1)
    }

    #[test]
    fn test_dropdown_hangs_under_profile_button() {
        let dropdown = dropdown_rect(profile_button(), SCREEN);
        assert_eq!(dropdown.right(), 80);
        assert_eq!(dropdown.y, 1);
        assert_eq!(dropdown.height, 5);
    }

    #[test]
    fn test_items_one_per_row() {
        let items = item_rects(dropdown_rect(profile_button(), SCREEN));
        let labels: Vec<_> = items.iter().map(|(i, _)| *i).collect();
        assert_eq!(labels, MenuItem::ALL.to_vec());
        assert_eq!(items[0].1.y, 2);
        assert_eq!(items[2].1.y, 4);
    }

    #[test]
    fn test_submenu_touches_dropdown() {
        let dropdown = dropdown_rect(profile_button(), SCREEN);
        let help_row = item_rects(dropdown)[2].1;
        let submenu = submenu_rect(dropdown, help_row, SCREEN);

        assert_eq!(submenu.right(), dropdown.x);
        assert_eq!(entry_rects(submenu)[0].1.y, help_row.y);
    }

    #[test]
    fn test_submenu_stays_on_small_screen() {
        let screen = Rect::new(0, 0, 30, 6);
        let dropdown = dropdown_rect(Rect::new(27, 0, 3, 1), screen);
        let help_row = item_rects(dropdown)[2].1;
        let submenu = submenu_rect(dropdown, help_row, screen);

        assert!(submenu.bottom() <= screen.bottom());
        assert!(submenu.right() <= dropdown.x);
    }
}
