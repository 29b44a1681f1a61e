//! Pre-rendered images for the demo.
//!
//! On the device these bitmaps are produced at build time. The simulator bakes
//! them at startup instead, by drawing `embedded-graphics` mono-font text into
//! a scratch [`FrameBuffer`] and keeping its pixels.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_9X18_BOLD, FONT_10X20};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyleBuilder, Rectangle, StrokeAlignment};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use touchgui_core::{Bitmap, ButtonImages, DigitSet, FrameBuffer};

// ---------------------------------------------------------------------------
// Palette and geometry
// ---------------------------------------------------------------------------

pub const SCREEN_FG: Rgb565 = Rgb565::BLACK;
pub const SCREEN_BG: Rgb565 = Rgb565::WHITE;

pub const NAV_COUNT: usize = 3;
const NAV_FONT: &MonoFont<'static> = &FONT_9X18_BOLD;
const LABEL_FONT: &MonoFont<'static> = &FONT_10X20;
const DIGIT_FONT: &MonoFont<'static> = &FONT_10X20;

/// Border thickness of the nav button images; the pressed one is the widest.
const NAV_BORDER_ENABLED: u32 = 4;
const NAV_BORDER_DISABLED: u32 = 1;
const NAV_BORDER_PRESSED: u32 = 6;

const NAV_BG_ENABLED: Rgb565 = Rgb565::CSS_SILVER;
const NAV_BG_DISABLED: Rgb565 = SCREEN_BG;
const NAV_BG_PRESSED: Rgb565 = Rgb565::RED;

pub const LABEL_TEXT: [&str; 4] = ["Label 0A", "Label 0B", "Label 1A", "Label 1B"];
const NAV_TEXT: [&str; NAV_COUNT] = ["PAGE 0", "PAGE 1", "PAGE 2"];

/// Size of one nav button: a third of the screen wide.
pub fn nav_size(screen: Size) -> Size {
    Size::new(
        screen.width / NAV_COUNT as u32,
        NAV_FONT.character_size.height + 2 * NAV_BORDER_PRESSED,
    )
}

// ---------------------------------------------------------------------------
// Image
// ---------------------------------------------------------------------------

/// Text framed by an optional border, centered on a solid background.
struct Art<'t> {
    text: &'t str,
    font: &'static MonoFont<'static>,
    foreground: Rgb565,
    background: Rgb565,
    border: u32,
}

/// Owned pixels of one pre-rendered image.
pub struct Image {
    size: Size,
    pixels: Vec<Rgb565>,
}

impl Image {
    fn render(size: Size, art: &Art<'_>) -> Self {
        let mut scratch = FrameBuffer::filled(size, art.background);

        if art.border > 0 {
            let frame = PrimitiveStyleBuilder::new()
                .stroke_color(art.foreground)
                .stroke_width(art.border)
                .stroke_alignment(StrokeAlignment::Inside)
                .build();
            let Ok(()) = Rectangle::new(Point::zero(), size)
                .into_styled(frame)
                .draw(&mut scratch);
        }

        let character = MonoTextStyle::new(art.font, art.foreground);
        let layout = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        let center = Rectangle::new(Point::zero(), size).center();
        let Ok(_) =
            Text::with_text_style(art.text, center, character, layout).draw(&mut scratch);

        Self {
            size,
            pixels: scratch.pixels().to_vec(),
        }
    }

    /// Image exactly as large as the text it holds.
    fn fitted(art: &Art<'_>) -> Self {
        Self::render(text_size(art.font, art.text), art)
    }

    pub fn bitmap(&self) -> Bitmap<'_> {
        Bitmap::new(self.size.width, self.size.height, &self.pixels)
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

fn text_size(font: &MonoFont<'_>, text: &str) -> Size {
    let chars = text.chars().count() as u32;
    Size::new(
        font.character_size.width * chars + font.character_spacing * chars.saturating_sub(1),
        font.character_size.height,
    )
}

// ---------------------------------------------------------------------------
// Asset set
// ---------------------------------------------------------------------------

/// Every image the navigation demo uses.
pub struct Assets {
    labels: [Image; 4],
    digits: [Image; 10],
    minus: Image,
    /// Per nav button: enabled, disabled, pressed.
    navs: [[Image; 3]; NAV_COUNT],
}

impl Assets {
    pub fn bake(screen: Size) -> Self {
        let plain = |text| Art {
            text,
            font: LABEL_FONT,
            foreground: SCREEN_FG,
            background: SCREEN_BG,
            border: 0,
        };
        let glyph = |text| Art {
            font: DIGIT_FONT,
            ..plain(text)
        };

        let labels = LABEL_TEXT.map(|text| Image::fitted(&plain(text)));
        let digits = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"]
            .map(|text| Image::fitted(&glyph(text)));
        let minus = Image::fitted(&glyph("-"));

        let nav_size = nav_size(screen);
        let navs = NAV_TEXT.map(|text| {
            [
                (NAV_BG_ENABLED, NAV_BORDER_ENABLED),
                (NAV_BG_DISABLED, NAV_BORDER_DISABLED),
                (NAV_BG_PRESSED, NAV_BORDER_PRESSED),
            ]
            .map(|(background, border)| {
                Image::render(
                    nav_size,
                    &Art {
                        text,
                        font: NAV_FONT,
                        foreground: SCREEN_FG,
                        background,
                        border,
                    },
                )
            })
        });

        log::debug!("Baked {} label, 11 digit and {} nav images", labels.len(), 3 * NAV_COUNT);
        Self {
            labels,
            digits,
            minus,
            navs,
        }
    }

    pub fn label(&self, n: usize) -> &Image {
        &self.labels[n]
    }

    pub fn digit_set(&self) -> DigitSet<'_> {
        DigitSet::new(core::array::from_fn(|n| self.digits[n].bitmap()))
            .with_minus(self.minus.bitmap())
    }

    pub fn nav_images(&self, n: usize) -> ButtonImages<'_> {
        let [enabled, disabled, pressed] = &self.navs[n];
        ButtonImages {
            enabled: enabled.bitmap(),
            disabled: disabled.bitmap(),
            pressed: pressed.bitmap(),
        }
    }
}
