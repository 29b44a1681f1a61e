//! Button: a label that can be pressed.
//!
//! The button shows its `enabled` image normally, its `pressed` image while
//! pressed, and its `disabled` image when disabled (pressed state only shows
//! while enabled).
//!
//! # Modes
//!
//! | event                     | Momentary                      | Check            | Radio          |
//! |---------------------------|--------------------------------|------------------|----------------|
//! | down outside, unfocused   | declined                       | declined         | declined       |
//! | down inside or focused    | pressed, `on_down` if changed  | toggle, `on_down`| pressed, `on_down` if changed |
//! | move                      | kept only by the focus holder  | same             | same           |
//! | up while focused          | released, `on_up`, `on_click` if inside | no change | no change |
//!
//! A gesture that started somewhere else (or while the button was disabled)
//! is never taken over: without focus, only a fresh `down` is considered.
//! Keeping radio groups exclusive is up to the application, via
//! [`Button::set_pressed`].

use core::cell::Cell;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::trace;

use crate::canvas::{Bitmap, Canvas};
use crate::error::GuiResult;
use crate::focus::Context;
use crate::touch::{TouchEvent, TouchPhase};
use crate::widget::label::check_same_size;
use crate::widget::{Handler, Widget, WidgetBase};

use alloc::boxed::Box;

/// Press behaviour, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonMode {
    /// Pressed while held; clicks on release inside the button
    Momentary,
    /// Each press toggles the pressed state (checkbox)
    Check,
    /// Press selects; only the application deselects
    Radio,
}

/// The three same-sized images a button switches between.
#[derive(Debug, Clone, Copy)]
pub struct ButtonImages<'a> {
    pub enabled: Bitmap<'a>,
    pub disabled: Bitmap<'a>,
    pub pressed: Bitmap<'a>,
}

/// A pressable widget with down/up/click callbacks.
///
/// # Examples
/// ```ignore
/// let button = Button::new(Point::new(0, 0), BG, images, ButtonMode::Momentary)?
///     .on_click(|canvas| counter.set_value(counter.value() + 1, canvas));
/// ```
pub struct Button<'a> {
    base: WidgetBase,
    images: ButtonImages<'a>,
    mode: ButtonMode,
    pressed: Cell<bool>,
    on_down: Option<Handler<'a>>,
    on_up: Option<Handler<'a>>,
    on_click: Option<Handler<'a>>,
}

impl<'a> Button<'a> {
    /// Create a released button at `origin`, sized to its images.
    ///
    /// All three images must have the same size.
    pub fn new(
        origin: Point,
        background: Rgb565,
        images: ButtonImages<'a>,
        mode: ButtonMode,
    ) -> GuiResult<Self> {
        check_same_size(&images.enabled, &images.disabled)?;
        check_same_size(&images.enabled, &images.pressed)?;

        Ok(Self {
            base: WidgetBase::new(Rectangle::new(origin, images.enabled.size()), background),
            images,
            mode,
            pressed: Cell::new(false),
            on_down: None,
            on_up: None,
            on_click: None,
        })
    }

    /// Set the initial pressed state.
    pub fn with_pressed(self, pressed: bool) -> Self {
        self.pressed.set(pressed);
        self
    }

    /// Start disabled.
    pub fn disabled(self) -> Self {
        self.base.replace_enabled(false);
        self
    }

    /// Start hidden.
    pub fn hidden(self) -> Self {
        self.base.set_visible(false);
        self
    }

    /// Called when a `down` changes the pressed state.
    pub fn on_down(mut self, handler: impl Fn(&mut dyn Canvas) + 'a) -> Self {
        self.on_down = Some(Box::new(handler));
        self
    }

    /// Called when a momentary button is released.
    pub fn on_up(mut self, handler: impl Fn(&mut dyn Canvas) + 'a) -> Self {
        self.on_up = Some(Box::new(handler));
        self
    }

    /// Called after `on_up` when the release point is inside the button.
    pub fn on_click(mut self, handler: impl Fn(&mut dyn Canvas) + 'a) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    pub fn mode(&self) -> ButtonMode {
        self.mode
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.get()
    }

    /// Set the pressed state directly, e.g. to deselect the other buttons of
    /// a radio group. Redraws on change; fires no callbacks.
    pub fn set_pressed(&self, pressed: bool, canvas: &mut dyn Canvas) {
        self.update_pressed(pressed, canvas);
    }

    /// Store `pressed`, redrawing and returning `true` only if it changed.
    fn update_pressed(&self, pressed: bool, canvas: &mut dyn Canvas) -> bool {
        if self.pressed.replace(pressed) == pressed {
            return false;
        }
        self.draw(canvas);
        true
    }

    fn fire(handler: &Option<Handler<'a>>, canvas: &mut dyn Canvas) {
        if let Some(handler) = handler {
            handler(canvas);
        }
    }
}

impl Widget for Button<'_> {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        if !self.is_visible() {
            return;
        }
        let image = match (self.is_enabled(), self.is_pressed()) {
            (true, true) => &self.images.pressed,
            (true, false) => &self.images.enabled,
            (false, _) => &self.images.disabled,
        };
        canvas.write(self.bounds().top_left, image);
    }

    fn event(&self, event: &TouchEvent, cx: &mut Context<'_>) -> bool {
        let id = self.id();
        let focused = cx.focus.enter(id);

        // A gesture in progress always runs to its `up`, even if a callback
        // hid or disabled the button meanwhile.
        if !focused && !self.base.is_interactive() {
            return false;
        }

        match event.phase {
            TouchPhase::None => false,
            TouchPhase::Down => {
                if !focused && !self.contains(event.point()) {
                    return false;
                }
                cx.focus.claim(id);

                let pressed = match self.mode {
                    ButtonMode::Check => !self.is_pressed(),
                    ButtonMode::Momentary | ButtonMode::Radio => true,
                };
                trace!("{:?} {:?} down, pressed -> {}", id, self.mode, pressed);
                if self.update_pressed(pressed, cx.canvas) {
                    Self::fire(&self.on_down, cx.canvas);
                }
                true
            }
            // Slide-in: moves only matter to the widget that owns the gesture.
            TouchPhase::Move => focused,
            TouchPhase::Up => {
                if !focused {
                    return false;
                }
                cx.focus.release(id);

                if self.mode == ButtonMode::Momentary {
                    self.update_pressed(false, cx.canvas);
                    Self::fire(&self.on_up, cx.canvas);
                    // Released outside the button: cancelled, not a click.
                    if self.contains(event.point()) {
                        trace!("{:?} clicked", id);
                        Self::fire(&self.on_click, cx.canvas);
                    }
                }
                true
            }
        }
    }
}
