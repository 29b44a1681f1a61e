//! Static label: one image when enabled, another when disabled.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::canvas::{Bitmap, Canvas};
use crate::error::{GuiError, GuiResult};
use crate::widget::{Widget, WidgetBase};

/// Fail unless `image` has the same dimensions as `reference`.
pub(crate) fn check_same_size(reference: &Bitmap<'_>, image: &Bitmap<'_>) -> GuiResult<()> {
    if reference.size() == image.size() {
        Ok(())
    } else {
        Err(GuiError::ImageSizeMismatch {
            expected_width: reference.width(),
            expected_height: reference.height(),
            width: image.width(),
            height: image.height(),
        })
    }
}

/// A label sized to its images. It never handles input.
pub struct Label<'a> {
    base: WidgetBase,
    enabled_image: Bitmap<'a>,
    disabled_image: Bitmap<'a>,
}

impl<'a> Label<'a> {
    /// Create a label at `origin`. Both images must have the same size.
    pub fn new(
        origin: Point,
        background: Rgb565,
        enabled_image: Bitmap<'a>,
        disabled_image: Bitmap<'a>,
    ) -> GuiResult<Self> {
        check_same_size(&enabled_image, &disabled_image)?;
        Ok(Self {
            base: WidgetBase::new(Rectangle::new(origin, enabled_image.size()), background),
            enabled_image,
            disabled_image,
        })
    }

    /// Start hidden; the label is not drawn until made visible.
    pub fn hidden(self) -> Self {
        self.base.set_visible(false);
        self
    }
}

impl Widget for Label<'_> {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        if !self.is_visible() {
            return;
        }
        let image = if self.is_enabled() {
            &self.enabled_image
        } else {
            &self.disabled_image
        };
        canvas.write(self.bounds().top_left, image);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::{Context, Focus};
    use crate::test_support::{RecordingCanvas, solid};
    use crate::touch::TouchEvent;

    #[test]
    fn test_mismatched_images_rejected() {
        let a = solid(10, 5, Rgb565::RED);
        let b = solid(10, 6, Rgb565::RED);

        let result = Label::new(
            Point::zero(),
            Rgb565::BLACK,
            Bitmap::new(10, 5, &a),
            Bitmap::new(10, 6, &b),
        );
        assert_eq!(
            result.err(),
            Some(GuiError::ImageSizeMismatch {
                expected_width: 10,
                expected_height: 5,
                width: 10,
                height: 6,
            })
        );
    }

    #[test]
    fn test_draw_picks_image_by_enabled_state() {
        let en = solid(6, 4, Rgb565::GREEN);
        let dis = solid(6, 4, Rgb565::RED);
        let label = Label::new(
            Point::new(5, 5),
            Rgb565::BLACK,
            Bitmap::new(6, 4, &en),
            Bitmap::new(6, 4, &dis),
        )
        .unwrap();
        let mut canvas = RecordingCanvas::new();

        assert_eq!(label.bounds(), Rectangle::new(Point::new(5, 5), Size::new(6, 4)));

        label.draw(&mut canvas);
        assert_eq!(canvas.pixel(Point::new(5, 5)), Some(Rgb565::GREEN));

        label.set_enabled(false, false, &mut canvas);
        assert_eq!(canvas.pixel(Point::new(10, 8)), Some(Rgb565::RED));
    }

    #[test]
    fn test_label_ignores_touch() {
        let px = solid(6, 4, Rgb565::GREEN);
        let label = Label::new(
            Point::zero(),
            Rgb565::BLACK,
            Bitmap::new(6, 4, &px),
            Bitmap::new(6, 4, &px),
        )
        .unwrap();
        let mut canvas = RecordingCanvas::new();
        let mut focus = Focus::new();

        let mut cx = Context::new(&mut canvas, &mut focus);
        assert!(!label.event(&TouchEvent::down(1, 1), &mut cx));
        assert!(focus.is_free());
    }

    #[test]
    fn test_hidden_label_draws_nothing() {
        let px = solid(6, 4, Rgb565::GREEN);
        let label = Label::new(
            Point::zero(),
            Rgb565::BLACK,
            Bitmap::new(6, 4, &px),
            Bitmap::new(6, 4, &px),
        )
        .unwrap()
        .hidden();
        let mut canvas = RecordingCanvas::new();

        label.draw(&mut canvas);
        label.erase(&mut canvas);
        assert_eq!(canvas.op_count(), 0);
    }
}
