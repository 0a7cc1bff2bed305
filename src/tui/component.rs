use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of the screen that knows how to draw itself.
///
/// Props arrive as struct fields; persistent state (scroll offsets, input
/// buffers) is borrowed mutably so rendering can refresh layout caches.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that reacts to terminal events.
pub trait EventHandler {
    /// The higher-level event this component emits.
    type Event;

    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
