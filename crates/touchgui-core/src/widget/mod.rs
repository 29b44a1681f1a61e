//! Widget base and the capability set every widget implements.
//!
//! Widgets are owned by whoever builds them (usually long-lived storage set
//! up at boot) and shared by reference with pages, routers and callbacks. All
//! mutable widget state therefore lives in [`Cell`]s and every method takes
//! `&self`; the whole layer runs on one thread with no preemption.

use core::cell::Cell;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::canvas::Canvas;
use crate::focus::{Context, WidgetId};
use crate::touch::TouchEvent;

pub mod button;
pub mod label;
pub mod number;
pub mod slider;

pub use button::{Button, ButtonImages, ButtonMode};
pub use label::Label;
pub use number::Number;
pub use slider::{Slider, SliderStyle};

/// Callback fired by a button transition.
///
/// State the callback needs (the old "opaque argument") is captured by the
/// closure. It runs synchronously inside the event call and may draw.
pub type Handler<'a> = alloc::boxed::Box<dyn Fn(&mut dyn Canvas) + 'a>;

/// Callback fired with a slider's new value after a drag changed it.
pub type ValueHandler<'a> = alloc::boxed::Box<dyn Fn(i32, &mut dyn Canvas) + 'a>;

/// Geometry, background and visibility/enabled state shared by all widgets.
///
/// The outer rectangle is fixed after construction, except for the numeric
/// display whose drawn extent depends on its digits.
#[derive(Debug)]
pub struct WidgetBase {
    bounds: Cell<Rectangle>,
    background: Rgb565,
    visible: Cell<bool>,
    enabled: Cell<bool>,
}

impl WidgetBase {
    pub fn new(bounds: Rectangle, background: Rgb565) -> Self {
        Self {
            bounds: Cell::new(bounds),
            background,
            visible: Cell::new(true),
            enabled: Cell::new(true),
        }
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds.get()
    }

    pub(crate) fn set_bounds(&self, bounds: Rectangle) {
        self.bounds.set(bounds);
    }

    pub fn background(&self) -> Rgb565 {
        self.background
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Store the enabled flag, returning whether it changed.
    pub fn replace_enabled(&self, enabled: bool) -> bool {
        self.enabled.replace(enabled) != enabled
    }

    /// Half-open hit test: `x in [left, left + width)`, same for rows.
    pub fn contains(&self, point: Point) -> bool {
        self.bounds.get().contains(point)
    }

    /// Visible and enabled, i.e. allowed to start a gesture.
    pub fn is_interactive(&self) -> bool {
        self.is_visible() && self.is_enabled()
    }

    /// Paint the background over the widget's rectangle, if visible.
    pub fn erase(&self, canvas: &mut dyn Canvas) {
        if self.is_visible() {
            canvas.fill_rect(self.bounds.get(), self.background);
        }
    }
}

/// The capability set shared by labels, buttons, sliders and numbers.
///
/// Pages and routers hold `&dyn Widget` and only ever call through this
/// trait. Every method takes `&self`; see the module docs.
pub trait Widget {
    /// Common geometry and state.
    fn base(&self) -> &WidgetBase;

    /// Paint the current state. No-op while invisible.
    fn draw(&self, canvas: &mut dyn Canvas);

    /// Paint the background over the widget. No-op while invisible.
    fn erase(&self, canvas: &mut dyn Canvas) {
        self.base().erase(canvas);
    }

    /// Offer a touch event. Returns `true` if the widget claimed it.
    ///
    /// Non-interactive widgets keep the default, which declines everything.
    fn event(&self, _event: &TouchEvent, _cx: &mut Context<'_>) -> bool {
        false
    }

    fn id(&self) -> WidgetId {
        WidgetId::of(self)
    }

    fn bounds(&self) -> Rectangle {
        self.base().bounds()
    }

    fn contains(&self, point: Point) -> bool {
        self.base().contains(point)
    }

    fn is_visible(&self) -> bool {
        self.base().is_visible()
    }

    /// Change visibility without painting anything.
    fn set_visible(&self, visible: bool) {
        self.base().set_visible(visible);
    }

    fn is_enabled(&self) -> bool {
        self.base().is_enabled()
    }

    /// Enable or disable the widget.
    ///
    /// Every widget looks different when disabled, so a real change redraws.
    /// `force_draw` paints even when nothing changed, for the first paint of
    /// a widget whose default image was never drawn.
    fn set_enabled(&self, enabled: bool, force_draw: bool, canvas: &mut dyn Canvas) {
        if self.base().replace_enabled(enabled) || force_draw {
            self.draw(canvas);
        }
    }
}
