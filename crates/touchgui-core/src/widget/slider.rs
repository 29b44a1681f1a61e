//! Horizontal slider: a track with a handle that is dragged to pick a value.
//!
//! ```text
//! xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx
//! x                           x     x                 x
//! x                           x hnd x                 x
//! x                           x     x                 x
//! xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx
//! ```
//!
//! The handle's center column encodes the value. Travel runs from
//! `handle_width / 2` to `width - 1 - handle_width / 2` (relative to the left
//! edge), and the handle width is always odd so both ends have one exact
//! center pixel: `min` sits flush against the left border and `max` flush
//! against the right one.
//!
//! Columns are mapped linearly with round-half-up. The end values therefore
//! own half as many columns as the interior ones, and dragging past either
//! end saturates.

use core::cell::Cell;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::trace;

use alloc::boxed::Box;

use crate::canvas::Canvas;
use crate::error::{GuiError, GuiResult};
use crate::focus::Context;
use crate::touch::{TouchEvent, TouchPhase};
use crate::widget::{ValueHandler, Widget, WidgetBase};

/// Colors used to paint a slider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderStyle {
    /// Track border and handle edges
    pub foreground: Rgb565,
    /// Screen background, painted when the slider is erased
    pub background: Rgb565,
    /// Track interior
    pub track: Rgb565,
    /// Handle interior
    pub handle: Rgb565,
}

pub struct Slider<'a> {
    base: WidgetBase,
    style: SliderStyle,
    handle_width: u32,
    min: i32,
    max: i32,
    value: Cell<i32>,
    on_value: Option<ValueHandler<'a>>,
}

impl<'a> Slider<'a> {
    /// Create a slider over `bounds` covering `min..=max`.
    ///
    /// The handle defaults to a square the height of the track (rounded up to
    /// odd). `initial` is clamped into range.
    pub fn new(
        bounds: Rectangle,
        style: SliderStyle,
        min: i32,
        max: i32,
        initial: i32,
    ) -> GuiResult<Self> {
        if min >= max {
            return Err(GuiError::InvalidRange { min, max });
        }
        let handle_width = bounds.size.height / 2 * 2 + 1;
        Self::check_geometry(bounds.size, handle_width)?;

        Ok(Self {
            base: WidgetBase::new(bounds, style.background),
            style,
            handle_width,
            min,
            max,
            value: Cell::new(initial.clamp(min, max)),
            on_value: None,
        })
    }

    /// Handle must have room to travel and an interior to fill.
    fn check_geometry(size: Size, handle_width: u32) -> GuiResult<()> {
        if size.height < 3 || handle_width < 3 || size.width <= handle_width {
            return Err(GuiError::SliderTooSmall {
                width: size.width,
                height: size.height,
                handle_width,
            });
        }
        Ok(())
    }

    /// Override the handle width. Even widths are bumped to the next odd one.
    pub fn with_handle_width(mut self, handle_width: u32) -> GuiResult<Self> {
        let handle_width = handle_width | 1;
        Self::check_geometry(self.bounds().size, handle_width)?;
        self.handle_width = handle_width;
        Ok(self)
    }

    /// Start hidden.
    pub fn hidden(self) -> Self {
        self.base.set_visible(false);
        self
    }

    /// Called with the new value whenever a drag changes it.
    pub fn on_value(mut self, handler: impl Fn(i32, &mut dyn Canvas) + 'a) -> Self {
        self.on_value = Some(Box::new(handler));
        self
    }

    pub fn value(&self) -> i32 {
        self.value.get()
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn handle_width(&self) -> u32 {
        self.handle_width
    }

    /// Handle travel relative to the left edge, as `(first, last)` center columns.
    fn travel(&self) -> (i32, i32) {
        let half = (self.handle_width / 2) as i32;
        (half, self.bounds().size.width as i32 - 1 - half)
    }

    /// Absolute column of the handle center for `value`, clamped into range.
    pub fn value_to_column(&self, value: i32) -> i32 {
        let (off_min, off_max) = self.travel();
        let offset = if value <= self.min {
            off_min
        } else if value >= self.max {
            off_max
        } else {
            let off_range = i64::from(off_max - off_min);
            let val_range = i64::from(self.max) - i64::from(self.min);
            let scaled = ((i64::from(value) - i64::from(self.min)) * off_range + val_range / 2)
                / val_range;
            off_min + scaled as i32
        };
        self.bounds().top_left.x + offset
    }

    /// Value whose handle center is nearest to absolute `column`.
    ///
    /// Columns at or beyond either end of travel saturate to `min`/`max`.
    pub fn column_to_value(&self, column: i32) -> i32 {
        let (off_min, off_max) = self.travel();
        let offset = column - self.bounds().top_left.x;
        if offset <= off_min {
            return self.min;
        }
        if offset >= off_max {
            return self.max;
        }
        let off_range = i64::from(off_max - off_min);
        let val_range = i64::from(self.max) - i64::from(self.min);
        let scaled = (i64::from(offset - off_min) * val_range + off_range / 2) / off_range;
        self.min + scaled as i32
    }

    /// Set the value directly. Clamps, repaints the handle if visible and the
    /// value changed, and never fires the value callback.
    pub fn set_value(&self, value: i32, canvas: &mut dyn Canvas) {
        self.update_value(value, canvas);
    }

    /// Clamp and store `value`, returning whether it changed.
    fn update_value(&self, value: i32, canvas: &mut dyn Canvas) -> bool {
        let value = value.clamp(self.min, self.max);
        if value == self.value.get() {
            return false;
        }
        if self.is_visible() {
            self.erase_handle(canvas);
            self.value.set(value);
            self.draw_handle(canvas);
        } else {
            self.value.set(value);
        }
        true
    }

    /// Top and bottom rows of the track interior.
    fn interior_rows(&self) -> (i32, i32) {
        let bounds = self.bounds();
        let top = bounds.top_left.y + 1;
        (top, top + bounds.size.height as i32 - 3)
    }

    fn draw_handle(&self, canvas: &mut dyn Canvas) {
        let half = (self.handle_width / 2) as i32;
        let center = self.value_to_column(self.value());
        let (left, right) = (center - half, center + half);
        let (top, bottom) = self.interior_rows();

        canvas.line(Point::new(left, top), Point::new(left, bottom), self.style.foreground);
        canvas.line(Point::new(right, top), Point::new(right, bottom), self.style.foreground);
        canvas.fill_rect(
            Rectangle::new(
                Point::new(left + 1, top),
                Size::new(self.handle_width - 2, self.bounds().size.height - 2),
            ),
            self.style.handle,
        );
    }

    /// Paint the track over the handle, leaving the track border alone when
    /// the handle sits flush against either end.
    fn erase_handle(&self, canvas: &mut dyn Canvas) {
        let bounds = self.bounds();
        let center = self.value_to_column(self.value());
        let mut left = center - (self.handle_width / 2) as i32;
        let mut width = self.handle_width;

        if left == bounds.top_left.x {
            left += 1;
            width -= 1;
        } else if left + self.handle_width as i32 == bounds.top_left.x + bounds.size.width as i32
        {
            width -= 1;
        }

        let (top, _) = self.interior_rows();
        canvas.fill_rect(
            Rectangle::new(Point::new(left, top), Size::new(width, bounds.size.height - 2)),
            self.style.track,
        );
    }
}

impl Widget for Slider<'_> {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    /// Border, track interior, then the handle.
    fn draw(&self, canvas: &mut dyn Canvas) {
        if !self.is_visible() {
            return;
        }
        let bounds = self.bounds();
        canvas.draw_rect(bounds, self.style.foreground);
        canvas.fill_rect(
            Rectangle::new(
                bounds.top_left + Point::new(1, 1),
                bounds.size.saturating_sub(Size::new(2, 2)),
            ),
            self.style.track,
        );
        self.draw_handle(canvas);
    }

    fn event(&self, event: &TouchEvent, cx: &mut Context<'_>) -> bool {
        let id = self.id();
        let focused = cx.focus.enter(id);

        if !focused && !self.base.is_interactive() {
            return false;
        }

        match event.phase {
            TouchPhase::None => false,
            TouchPhase::Down | TouchPhase::Move => {
                // Only a down inside the track starts a drag; a finger sliding
                // in from elsewhere is ignored.
                let starts = event.phase == TouchPhase::Down && self.contains(event.point());
                if !focused && !starts {
                    return false;
                }
                cx.focus.claim(id);

                let value = self.column_to_value(event.x);
                if self.update_value(value, cx.canvas) {
                    trace!("{:?} value -> {}", id, value);
                    if let Some(handler) = &self.on_value {
                        handler(value, &mut *cx.canvas);
                    }
                }
                true
            }
            TouchPhase::Up => {
                if !focused {
                    return false;
                }
                cx.focus.release(id);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::Focus;
    use crate::test_support::{Op, RecordingCanvas};
    use alloc::vec::Vec;
    use core::cell::RefCell;

    const STYLE: SliderStyle = SliderStyle {
        foreground: Rgb565::WHITE,
        background: Rgb565::BLACK,
        track: Rgb565::BLUE,
        handle: Rgb565::YELLOW,
    };

    /// 100x10 at (10, 20): handle 11 wide, centers travel over columns 15..=104.
    fn slider<'a>(min: i32, max: i32, initial: i32) -> Slider<'a> {
        Slider::new(
            Rectangle::new(Point::new(10, 20), Size::new(100, 10)),
            STYLE,
            min,
            max,
            initial,
        )
        .unwrap()
    }

    fn send(
        slider: &Slider<'_>,
        event: TouchEvent,
        canvas: &mut RecordingCanvas,
        focus: &mut Focus,
    ) -> bool {
        slider.event(&event, &mut Context::new(canvas, focus))
    }

    #[test]
    fn test_handle_width_is_odd() {
        let s = slider(0, 10, 0);
        assert_eq!(s.handle_width(), 11);
        assert_eq!(s.with_handle_width(6).unwrap().handle_width(), 7);
    }

    #[test]
    fn test_endpoints_map_exactly() {
        let s = slider(0, 10, 0);
        assert_eq!(s.value_to_column(0), 15);
        assert_eq!(s.value_to_column(10), 104);
        assert_eq!(s.column_to_value(15), 0);
        assert_eq!(s.column_to_value(104), 10);
    }

    #[test]
    fn test_round_trip_every_value() {
        let s = slider(0, 10, 0);
        for v in 0..=10 {
            assert_eq!(s.column_to_value(s.value_to_column(v)), v, "value {}", v);
        }

        let wide = slider(-3, 3, 0);
        for v in -3..=3 {
            assert_eq!(wide.column_to_value(wide.value_to_column(v)), v);
        }
    }

    #[test]
    fn test_mapping_saturates_outside_travel() {
        let s = slider(0, 10, 0);
        for column in [-50, 0, 10, 14] {
            assert_eq!(s.column_to_value(column), 0);
        }
        for column in [105, 109, 400] {
            assert_eq!(s.column_to_value(column), 10);
        }
        assert_eq!(s.value_to_column(-7), 15);
        assert_eq!(s.value_to_column(99), 104);
    }

    #[test]
    fn test_constructor_validates() {
        let bounds = Rectangle::new(Point::zero(), Size::new(100, 10));
        assert_eq!(
            Slider::new(bounds, STYLE, 5, 5, 5).err(),
            Some(GuiError::InvalidRange { min: 5, max: 5 })
        );

        let narrow = Rectangle::new(Point::zero(), Size::new(11, 10));
        assert_eq!(
            Slider::new(narrow, STYLE, 0, 10, 0).err(),
            Some(GuiError::SliderTooSmall {
                width: 11,
                height: 10,
                handle_width: 11,
            })
        );

        assert_eq!(Slider::new(bounds, STYLE, 0, 10, 50).unwrap().value(), 10);
    }

    #[test]
    fn test_set_value_clamps_and_repaints_handle_only() {
        let s = slider(0, 10, 0);
        let mut canvas = RecordingCanvas::new();
        s.draw(&mut canvas);
        canvas.clear_ops();

        s.set_value(42, &mut canvas);
        assert_eq!(s.value(), 10);

        let ops = canvas.ops();
        assert!(!ops.iter().any(|op| matches!(op, Op::DrawRect { .. })));
        // Handle was flush left: the erase skips the border column.
        assert_eq!(
            ops[0],
            Op::FillRect {
                area: Rectangle::new(Point::new(11, 21), Size::new(10, 8)),
                color: STYLE.track,
            }
        );
        assert_eq!(canvas.pixel(Point::new(10, 25)), Some(STYLE.foreground));
        assert_eq!(canvas.pixel(Point::new(12, 25)), Some(STYLE.track));
        assert_eq!(canvas.pixel(Point::new(104, 25)), Some(STYLE.handle));
        assert_eq!(canvas.pixel(Point::new(109, 25)), Some(STYLE.foreground));

        canvas.clear_ops();
        s.set_value(10, &mut canvas);
        assert_eq!(canvas.op_count(), 0);
    }

    #[test]
    fn test_erase_keeps_right_border() {
        let s = slider(0, 10, 10);
        let mut canvas = RecordingCanvas::new();
        s.draw(&mut canvas);
        canvas.clear_ops();

        s.set_value(5, &mut canvas);
        assert_eq!(
            canvas.ops()[0],
            Op::FillRect {
                area: Rectangle::new(Point::new(99, 21), Size::new(10, 8)),
                color: STYLE.track,
            }
        );
        assert_eq!(canvas.pixel(Point::new(109, 25)), Some(STYLE.foreground));
    }

    #[test]
    fn test_hidden_set_value_paints_nothing() {
        let s = slider(0, 10, 0).hidden();
        let mut canvas = RecordingCanvas::new();
        s.set_value(4, &mut canvas);
        assert_eq!(s.value(), 4);
        assert_eq!(canvas.op_count(), 0);
    }

    #[test]
    fn test_drag_updates_value_and_fires_callback() {
        let seen = RefCell::new(Vec::new());
        let s = slider(0, 10, 0).on_value(|v, _| seen.borrow_mut().push(v));
        let mut canvas = RecordingCanvas::new();
        let mut focus = Focus::new();

        assert!(send(&s, TouchEvent::down(60, 25), &mut canvas, &mut focus));
        assert_eq!(focus.holder(), Some(s.id()));
        assert_eq!(s.value(), 5);

        // Same value again: no callback.
        assert!(send(&s, TouchEvent::move_to(61, 25), &mut canvas, &mut focus));
        // Dragged well past the end and off the track.
        assert!(send(&s, TouchEvent::move_to(300, 90), &mut canvas, &mut focus));
        assert_eq!(s.value(), 10);

        assert!(send(&s, TouchEvent::up(300, 90), &mut canvas, &mut focus));
        assert!(focus.is_free());
        assert_eq!(*seen.borrow(), [5, 10]);
    }

    #[test]
    fn test_set_value_does_not_fire_callback() {
        let seen = RefCell::new(Vec::new());
        let s = slider(0, 10, 0).on_value(|v, _| seen.borrow_mut().push(v));
        let mut canvas = RecordingCanvas::new();

        s.set_value(3, &mut canvas);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_slide_in_is_ignored() {
        let seen = RefCell::new(Vec::new());
        let s = slider(0, 10, 0).on_value(|v, _| seen.borrow_mut().push(v));
        let mut canvas = RecordingCanvas::new();
        let mut focus = Focus::new();

        assert!(!send(&s, TouchEvent::down(5, 5), &mut canvas, &mut focus));
        assert!(!send(&s, TouchEvent::move_to(60, 25), &mut canvas, &mut focus));
        assert!(!send(&s, TouchEvent::up(60, 25), &mut canvas, &mut focus));

        assert_eq!(s.value(), 0);
        assert!(focus.is_free());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_disabled_slider_declines() {
        let s = slider(0, 10, 0);
        let mut canvas = RecordingCanvas::new();
        let mut focus = Focus::new();
        s.set_enabled(false, false, &mut canvas);

        assert!(!send(&s, TouchEvent::down(60, 25), &mut canvas, &mut focus));
        assert_eq!(s.value(), 0);
    }
}
