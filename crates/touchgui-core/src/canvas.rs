//! Render sink consumed by every widget.
//!
//! Widgets never talk to a display directly. They paint through [`Canvas`],
//! a small object-safe trait covering exactly what the widget layer needs:
//! blitting pre-rendered bitmaps, composing a number out of digit bitmaps,
//! filling and outlining rectangles, and drawing lines.
//!
//! `embedded-graphics` draw targets are generic over the target type, which
//! would make the widget trait non-object-safe. Instead any
//! `DrawTarget<Color = Rgb565, Error = Infallible>` gets a blanket
//! [`Canvas`] impl, so pages can hold `&dyn Widget` and callbacks can receive
//! `&mut dyn Canvas`.

use core::convert::Infallible;

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment,
};

use crate::config::DIGIT_COUNT;

/// Horizontal alignment of a composed number relative to its reference column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    /// Number starts at the reference column
    #[default]
    Left,
    /// Number is centered on the reference column
    Center,
    /// Number ends just before the reference column
    Right,
}

impl HAlign {
    /// Column where content `width` pixels wide starts when aligned to `reference`.
    pub fn start_column(self, reference: i32, width: u32) -> i32 {
        let width = width as i32;
        match self {
            HAlign::Left => reference,
            HAlign::Center => reference - width / 2,
            HAlign::Right => reference - width,
        }
    }
}

/// A fixed-size, pre-rendered image.
///
/// Pixels are stored row-major. The widget layer never inspects them; it only
/// hands them to a [`Canvas`] and compares dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bitmap<'a> {
    width: u32,
    height: u32,
    pixels: &'a [Rgb565],
}

impl<'a> Bitmap<'a> {
    /// Wrap a pixel slice as a `width` x `height` bitmap.
    ///
    /// # Panics
    /// If `pixels.len() != width * height`.
    pub const fn new(width: u32, height: u32, pixels: &'a [Rgb565]) -> Self {
        assert!(
            pixels.len() == (width as usize) * (height as usize),
            "bitmap pixel count does not match its dimensions"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub const fn pixels(&self) -> &'a [Rgb565] {
        self.pixels
    }
}

/// Table of pre-rendered digit images used by the numeric display.
#[derive(Debug, Clone, Copy)]
pub struct DigitSet<'a> {
    digits: [Bitmap<'a>; DIGIT_COUNT],
    minus: Option<Bitmap<'a>>,
}

impl<'a> DigitSet<'a> {
    /// Digits indexed by value: `digits[3]` renders "3".
    pub const fn new(digits: [Bitmap<'a>; DIGIT_COUNT]) -> Self {
        Self {
            digits,
            minus: None,
        }
    }

    /// Add a minus-sign image used as a prefix for negative values.
    ///
    /// Without one, negative values render as their magnitude.
    pub const fn with_minus(mut self, minus: Bitmap<'a>) -> Self {
        self.minus = Some(minus);
        self
    }

    pub fn digit(&self, digit: u8) -> &Bitmap<'a> {
        &self.digits[digit as usize % DIGIT_COUNT]
    }

    pub fn minus(&self) -> Option<&Bitmap<'a>> {
        self.minus.as_ref()
    }

    /// Visit the bitmaps making up `value`, most significant first.
    fn for_each_glyph(&self, value: i32, mut f: impl FnMut(&Bitmap<'a>)) {
        if value < 0
            && let Some(minus) = &self.minus
        {
            f(minus);
        }

        let magnitude = value.unsigned_abs();
        let mut divisor = 1u32;
        while magnitude / divisor >= 10 {
            divisor *= 10;
        }
        while divisor > 0 {
            f(self.digit(((magnitude / divisor) % 10) as u8));
            divisor /= 10;
        }
    }

    /// Size `value` occupies when composed: summed widths, tallest glyph.
    pub fn measure(&self, value: i32) -> Size {
        let mut size = Size::zero();
        self.for_each_glyph(value, |glyph| {
            size.width += glyph.width();
            size.height = size.height.max(glyph.height());
        });
        size
    }
}

/// Pixel sink the widget layer draws into.
///
/// Coordinates are in the sink's native pixel space; nothing here transforms
/// them. All operations are infallible and complete immediately.
pub trait Canvas {
    /// Blit a bitmap with its top-left corner at `at`.
    fn write(&mut self, at: Point, bitmap: &Bitmap<'_>);

    /// Fill `area` with a solid color.
    fn fill_rect(&mut self, area: Rectangle, color: Rgb565);

    /// Outline `area` with a one-pixel border lying inside the rectangle.
    fn draw_rect(&mut self, area: Rectangle, color: Rgb565);

    /// One-pixel line between two points, both inclusive.
    fn line(&mut self, from: Point, to: Point, color: Rgb565);

    /// Compose `value` from `digits`, aligned horizontally on `at.x` and
    /// top-aligned on `at.y`. Returns the size of the rendered number.
    fn write_number(
        &mut self,
        at: Point,
        value: i32,
        digits: &DigitSet<'_>,
        align: HAlign,
    ) -> Size {
        let size = digits.measure(value);
        let mut column = align.start_column(at.x, size.width);
        digits.for_each_glyph(value, |glyph| {
            self.write(Point::new(column, at.y), glyph);
            column += glyph.width() as i32;
        });
        size
    }
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

impl<D> Canvas for D
where
    D: DrawTarget<Color = Rgb565, Error = Infallible>,
{
    fn write(&mut self, at: Point, bitmap: &Bitmap<'_>) {
        let area = Rectangle::new(at, bitmap.size());
        infallible(self.fill_contiguous(&area, bitmap.pixels().iter().copied()));
    }

    fn fill_rect(&mut self, area: Rectangle, color: Rgb565) {
        infallible(self.fill_solid(&area, color));
    }

    fn draw_rect(&mut self, area: Rectangle, color: Rgb565) {
        let style = PrimitiveStyleBuilder::new()
            .stroke_color(color)
            .stroke_width(1)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();
        infallible(area.into_styled(style).draw(self));
    }

    fn line(&mut self, from: Point, to: Point, color: Rgb565) {
        infallible(
            Line::new(from, to)
                .into_styled(PrimitiveStyle::with_stroke(color, 1))
                .draw(self),
        );
    }
}
