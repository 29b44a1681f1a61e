//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use touchgui_core::{Bitmap, ButtonImages, DigitSet, FrameBuffer};

pub const SCREEN: Size = Size::new(480, 320);
pub const BG: Rgb565 = Rgb565::WHITE;

pub const ENABLED: Rgb565 = Rgb565::CSS_DARK_GRAY;
pub const DISABLED: Rgb565 = Rgb565::CSS_LIGHT_GRAY;
pub const PRESSED: Rgb565 = Rgb565::RED;

/// Owned pixels for one solid `width` x `height` image.
pub struct Solid {
    pub size: Size,
    pub pixels: Vec<Rgb565>,
}

impl Solid {
    pub fn new(size: Size, color: Rgb565) -> Self {
        Self {
            size,
            pixels: vec![color; (size.width * size.height) as usize],
        }
    }

    pub fn bitmap(&self) -> Bitmap<'_> {
        Bitmap::new(self.size.width, self.size.height, &self.pixels)
    }
}

/// Enabled/disabled/pressed images in three distinct solid colors.
pub struct ButtonArt {
    enabled: Solid,
    disabled: Solid,
    pressed: Solid,
}

impl ButtonArt {
    pub fn new(size: Size) -> Self {
        Self {
            enabled: Solid::new(size, ENABLED),
            disabled: Solid::new(size, DISABLED),
            pressed: Solid::new(size, PRESSED),
        }
    }

    pub fn images(&self) -> ButtonImages<'_> {
        ButtonImages {
            enabled: self.enabled.bitmap(),
            disabled: self.disabled.bitmap(),
            pressed: self.pressed.bitmap(),
        }
    }
}

/// Ten digit images, digit `n` being `6 + n` pixels wide and 12 tall.
pub struct Digits {
    glyphs: [Solid; 10],
}

impl Digits {
    pub fn new() -> Self {
        Self {
            glyphs: core::array::from_fn(|n| {
                Solid::new(Size::new(6 + n as u32, 12), Rgb565::new(n as u8 * 3, 20, 4))
            }),
        }
    }

    pub fn set(&self) -> DigitSet<'_> {
        DigitSet::new(core::array::from_fn(|n| self.glyphs[n].bitmap()))
    }
}

pub fn screen() -> FrameBuffer {
    FrameBuffer::filled(SCREEN, BG)
}
