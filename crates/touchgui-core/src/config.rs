//! Compile-time capacities and runtime touch configuration

use embedded_graphics::prelude::Size;
use serde::{Deserialize, Serialize};

/// Maximum number of widgets a single [`Page`](crate::page::Page) can hold.
pub const MAX_PAGE_WIDGETS: usize = 20;

/// Maximum number of top-level controls a [`Router`](crate::router::Router)
/// offers events to before the active page.
pub const MAX_ROUTER_CONTROLS: usize = 8;

/// Number of entries in a digit table (0 through 9).
pub const DIGIT_COUNT: usize = 10;

/// Default screen width in pixels (landscape 480x320 panel).
pub const DEFAULT_SCREEN_WIDTH_PX: u32 = 480;

/// Default screen height in pixels.
pub const DEFAULT_SCREEN_HEIGHT_PX: u32 = 320;

/// Settings for turning raw touch-controller samples into [`TouchEvent`]s.
///
/// [`TouchEvent`]: crate::touch::TouchEvent
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchConfig {
    /// Width of the touch surface in framebuffer pixels.
    pub screen_width: u32,
    /// Height of the touch surface in framebuffer pixels.
    pub screen_height: u32,
    /// A contact has to travel further than this (in pixels, on either axis)
    /// before a move is reported. Zero reports every coordinate change.
    pub move_threshold: u32,
}

impl TouchConfig {
    pub fn screen(&self) -> Size {
        Size::new(self.screen_width, self.screen_height)
    }
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH_PX,
            screen_height: DEFAULT_SCREEN_HEIGHT_PX,
            move_threshold: 0,
        }
    }
}
