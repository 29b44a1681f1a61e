//! RAM-backed framebuffer with per-pixel change detection.
//!
//! Widgets paint into this buffer instead of the display bus. Every write
//! that actually changes a pixel grows a dirty rectangle; [`FrameBuffer::flush`]
//! sends just that rectangle to the real display in one `fill_contiguous`.
//!
//! The buffer is allocated once, at construction; drawing never allocates.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, trace};

/// Smallest rectangle holding both `area` and `point`.
fn grow(area: Rectangle, point: Point) -> Rectangle {
    let bottom_right = area.bottom_right().unwrap_or(area.top_left);
    Rectangle::with_corners(
        area.top_left.component_min(point),
        bottom_right.component_max(point),
    )
}

/// Heap-allocated `Rgb565` pixel buffer.
///
/// Its `DrawTarget` error type is `Infallible`, which makes it a
/// [`Canvas`](crate::canvas::Canvas) too, so widgets draw into it directly.
pub struct FrameBuffer {
    size: Size,
    pixels: Vec<Rgb565>,
    dirty: Option<Rectangle>,
}

impl FrameBuffer {
    /// A black buffer of `size`.
    pub fn new(size: Size) -> Self {
        Self::filled(size, Rgb565::BLACK)
    }

    /// A buffer of `size` with every pixel set to `color`. Starts clean.
    pub fn filled(size: Size, color: Rgb565) -> Self {
        Self {
            size,
            pixels: vec![color; size.width as usize * size.height as usize],
            dirty: None,
        }
    }

    /// Row-major index of `point`, or `None` when it lies outside the buffer.
    fn index(&self, point: Point) -> Option<usize> {
        if !self.bounding_box().contains(point) {
            return None;
        }
        Some(point.y as usize * self.size.width as usize + point.x as usize)
    }

    /// Color of the pixel at `point`, or `None` outside the buffer.
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        self.index(point).map(|idx| self.pixels[idx])
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    /// Bounding box of the pixels changed since the last flush.
    pub fn dirty_area(&self) -> Option<Rectangle> {
        self.dirty
    }

    /// Forget pending changes without flushing them anywhere.
    pub fn mark_clean(&mut self) {
        self.dirty = None;
    }

    /// Store one pixel. Out-of-buffer points are dropped, and only a real
    /// color change dirties the buffer.
    #[inline]
    fn store(&mut self, point: Point, color: Rgb565) {
        let Some(idx) = self.index(point) else {
            return;
        };
        if self.pixels[idx] == color {
            return;
        }
        self.pixels[idx] = color;
        self.dirty = Some(match self.dirty {
            Some(area) => grow(area, point),
            None => Rectangle::new(point, Size::new(1, 1)),
        });
    }

    /// Send the dirty rectangle to `display` and start clean again.
    ///
    /// Nothing is sent when no pixel changed.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(area) = self.dirty.take() else {
            trace!("Flush skipped, nothing changed");
            return Ok(());
        };
        debug!(
            "Flushing {}x{} at ({}, {})",
            area.size.width, area.size.height, area.top_left.x, area.top_left.y
        );

        let stride = self.size.width as usize;
        let left = area.top_left.x as usize;
        let width = area.size.width as usize;
        let pixels = &self.pixels;
        let colors = area.rows().flat_map(move |y| {
            let start = y as usize * stride + left;
            pixels[start..start + width].iter().copied()
        });

        display.fill_contiguous(&area, colors)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.store(point, color);
        }
        Ok(())
    }

    /// Colors are paired with every point of `area`, clipped ones included,
    /// so a partially visible bitmap stays aligned.
    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        for (point, color) in area.points().zip(colors) {
            self.store(point, color);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        for point in area.points() {
            self.store(point, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let all = self.bounding_box();
        self.fill_solid(&all, color)
    }
}
