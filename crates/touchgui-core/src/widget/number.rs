//! Numeric display composed from a table of digit bitmaps.
//!
//! The number is anchored on a reference point: `x` is the alignment column
//! and `y` the top row. Its drawn extent depends on how many digits the
//! current value has, so unlike other widgets its bounds move with the value.

use core::cell::Cell;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::canvas::{Canvas, DigitSet, HAlign};
use crate::widget::{Widget, WidgetBase};

/// Displays an integer. Never handles input.
pub struct Number<'a> {
    base: WidgetBase,
    digits: &'a DigitSet<'a>,
    reference: Point,
    align: HAlign,
    value: Cell<i32>,
}

impl<'a> Number<'a> {
    pub fn new(
        reference: Point,
        background: Rgb565,
        digits: &'a DigitSet<'a>,
        value: i32,
        align: HAlign,
    ) -> Self {
        Self {
            base: WidgetBase::new(Self::extent(digits, reference, align, value), background),
            digits,
            reference,
            align,
            value: Cell::new(value),
        }
    }

    /// Start hidden.
    pub fn hidden(self) -> Self {
        self.base.set_visible(false);
        self
    }

    /// Rectangle `value` occupies when drawn.
    fn extent(digits: &DigitSet<'_>, reference: Point, align: HAlign, value: i32) -> Rectangle {
        let size = digits.measure(value);
        Rectangle::new(
            Point::new(align.start_column(reference.x, size.width), reference.y),
            size,
        )
    }

    pub fn value(&self) -> i32 {
        self.value.get()
    }

    pub fn align(&self) -> HAlign {
        self.align
    }

    /// The alignment column.
    pub fn reference_column(&self) -> i32 {
        self.reference.x
    }

    /// Show `value`. The old digits are erased first, since a shorter number
    /// would leave part of the longer one behind.
    ///
    /// The erase covers the area the sink reported for the last draw. While
    /// hidden nothing is drawn, so the bounds are only an estimate until the
    /// next paint.
    pub fn set_value(&self, value: i32, canvas: &mut dyn Canvas) {
        if value == self.value.get() {
            return;
        }
        self.erase(canvas);
        self.value.set(value);
        if self.is_visible() {
            self.draw(canvas);
        } else {
            self.base
                .set_bounds(Self::extent(self.digits, self.reference, self.align, value));
        }
    }
}

impl Widget for Number<'_> {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    /// Compose the digits and take the drawn extent from what the sink reports.
    fn draw(&self, canvas: &mut dyn Canvas) {
        if !self.is_visible() {
            return;
        }
        let size = canvas.write_number(self.reference, self.value(), self.digits, self.align);
        let column = self.align.start_column(self.reference.x, size.width);
        self.base
            .set_bounds(Rectangle::new(Point::new(column, self.reference.y), size));
    }
}
