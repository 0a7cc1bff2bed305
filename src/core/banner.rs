//! # Error Banner
//!
//! Two-phase dismissal: `hide()` hides the banner at once, but it keeps its
//! row in the layout until the removal delay has elapsed. The removal timer
//! can't be cancelled; if the banner is shown again first, the timer fires
//! without effect.

use std::time::{Duration, Instant};

/// Time between hiding the banner and freeing its row.
pub const BANNER_REMOVE_DELAY: Duration = Duration::from_millis(300);

/// The single user-visible failure message.
pub const BANNER_TEXT: &str = "Koa couldn't be reached. Please try again.";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    visible: bool,
    in_layout: bool,
    remove_at: Option<Instant>,
}

impl ErrorBanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the banner still occupies space (visible or fading out).
    pub fn in_layout(&self) -> bool {
        self.in_layout
    }

    pub fn removal_pending(&self) -> bool {
        self.remove_at.is_some()
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.in_layout = true;
    }

    pub fn hide(&mut self, now: Instant) {
        self.visible = false;
        let deadline = now + BANNER_REMOVE_DELAY;
        // An earlier timer keeps its deadline.
        self.remove_at = Some(self.remove_at.map_or(deadline, |at| at.min(deadline)));
    }

    /// Fire the removal timer if due. Returns true if it fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.remove_at {
            Some(at) if now >= at => {
                self.remove_at = None;
                if !self.visible {
                    self.in_layout = false;
                }
                true
            }
            _ => false,
        }
    }
}
