//! Helpers shared by the unit tests.

use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::canvas::{Bitmap, Canvas, DigitSet};
use crate::framebuffer::FrameBuffer;

/// One call made against a [`RecordingCanvas`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    Write { at: Point, size: Size },
    FillRect { area: Rectangle, color: Rgb565 },
    DrawRect { area: Rectangle, color: Rgb565 },
    Line { from: Point, to: Point, color: Rgb565 },
}

/// Canvas that logs every call and paints into a framebuffer.
pub struct RecordingCanvas {
    fb: FrameBuffer,
    ops: Vec<Op>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::with_size(Size::new(200, 120))
    }

    pub fn with_size(size: Size) -> Self {
        Self {
            fb: FrameBuffer::new(size),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn op_count(&self) -> usize {
        self.ops.len()
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        self.fb.pixel(point)
    }
}

impl Canvas for RecordingCanvas {
    fn write(&mut self, at: Point, bitmap: &Bitmap<'_>) {
        self.ops.push(Op::Write {
            at,
            size: bitmap.size(),
        });
        self.fb.write(at, bitmap);
    }

    fn fill_rect(&mut self, area: Rectangle, color: Rgb565) {
        self.ops.push(Op::FillRect { area, color });
        self.fb.fill_rect(area, color);
    }

    fn draw_rect(&mut self, area: Rectangle, color: Rgb565) {
        self.ops.push(Op::DrawRect { area, color });
        self.fb.draw_rect(area, color);
    }

    fn line(&mut self, from: Point, to: Point, color: Rgb565) {
        self.ops.push(Op::Line { from, to, color });
        self.fb.line(from, to, color);
    }
}

/// Pixel storage for a solid `width` x `height` bitmap.
pub fn solid(width: u32, height: u32, color: Rgb565) -> Vec<Rgb565> {
    vec![color; (width * height) as usize]
}

/// Color of digit `n` in [`digit_pixels`].
pub fn digit_color(n: usize) -> Rgb565 {
    Rgb565::new(3 * n as u8 + 1, 40, 10)
}

/// Storage for ten digit bitmaps: digit `n` is `4 + n` wide and 8 tall.
pub fn digit_pixels() -> [Vec<Rgb565>; 10] {
    core::array::from_fn(|n| solid(4 + n as u32, 8, digit_color(n)))
}

pub fn digit_set(storage: &[Vec<Rgb565>; 10]) -> DigitSet<'_> {
    DigitSet::new(core::array::from_fn(|n| {
        Bitmap::new(4 + n as u32, 8, &storage[n])
    }))
}
