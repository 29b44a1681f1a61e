//! The navigation demo: three nav buttons along the top, each showing a page.
//!
//! - Page 0 and page 1 hold two labels each.
//! - Page 2 holds three sliders, each driving a number with a different
//!   alignment (right, left, center) and range.
//!
//! The nav button of the active page is disabled. Widgets reference each
//! other, so they are built in layers that each borrow the previous ones:
//! [`Assets`] -> [`Displays`] -> [`Controls`] -> [`Pages`] -> [`NavGroup`].

use core::cell::Cell;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::info;

use touchgui_core::{
    Button, ButtonMode, Canvas, DigitSet, GuiResult, HAlign, Label, Number, Page, Router,
    Slider, SliderStyle, TouchEvent, Widget,
};

use crate::assets::{Assets, NAV_COUNT, SCREEN_BG, SCREEN_FG, nav_size};

const SLIDER_HEIGHT: u32 = 40;
const SLIDER_MARGIN: u32 = 1;
const SLIDER_TRACK: Rgb565 = Rgb565::CSS_LIGHT_GRAY;

const SLIDER_STYLE: SliderStyle = SliderStyle {
    foreground: SCREEN_FG,
    background: SCREEN_BG,
    track: SLIDER_TRACK,
    handle: Rgb565::WHITE,
};

/// Rows of the page 2 widgets.
const ROW_A: i32 = 40;
const ROW_B: i32 = ROW_A + SLIDER_HEIGHT as i32 + 20;
const ROW_C: i32 = ROW_B + SLIDER_HEIGHT as i32 + 20;
const ROW_D: i32 = ROW_C + SLIDER_HEIGHT as i32 + 20;

/// Value ranges of the three sliders.
const RANGES: [(i32, i32); 3] = [(0, 10), (1000, 5000), (0, 127)];

// ---------------------------------------------------------------------------
// Navigation requests
// ---------------------------------------------------------------------------

/// Page change asked for by a nav button, applied after dispatch returns.
///
/// Nav callbacks run inside the router's dispatch, so they cannot switch pages
/// themselves; they leave a request here instead.
#[derive(Debug, Default)]
pub struct NavRequest(Cell<Option<usize>>);

impl NavRequest {
    pub fn set(&self, page: usize) {
        self.0.set(Some(page));
    }

    pub fn take(&self) -> Option<usize> {
        self.0.take()
    }
}

// ---------------------------------------------------------------------------
// Widget layers
// ---------------------------------------------------------------------------

/// Widgets that only display things.
pub struct Displays<'a> {
    pub labels: [Label<'a>; 4],
    pub numbers: [Number<'a>; 3],
}

impl<'a> Displays<'a> {
    pub fn new(assets: &'a Assets, digits: &'a DigitSet<'a>, screen: Size) -> GuiResult<Self> {
        let center = (screen.width / 2) as i32;
        let label_height = assets.label(0).size().height as i32;

        // Two labels per page, stacked, page 1 further right than page 0.
        let label = move |n: usize, col: i32| {
            let row = 100 + (n as i32 % 2) * (label_height + 10);
            let image = assets.label(n).bitmap();
            Label::new(Point::new(col, row), SCREEN_BG, image, image)
        };
        let labels = [label(0, 100)?, label(1, 100)?, label(2, 200)?, label(3, 200)?];

        let number = move |row: i32, value: i32, align: HAlign| {
            Number::new(Point::new(center, row), SCREEN_BG, digits, value, align)
        };
        let numbers = [
            number(ROW_A, RANGES[0].0, HAlign::Right),
            number(ROW_B, RANGES[1].0, HAlign::Left),
            number(ROW_C, RANGES[2].0, HAlign::Center),
        ];

        Ok(Self { labels, numbers })
    }
}

/// Widgets that take touch input.
pub struct Controls<'a> {
    pub sliders: [Slider<'a>; 3],
    pub navs: [Button<'a>; NAV_COUNT],
}

impl<'a> Controls<'a> {
    pub fn new(
        assets: &'a Assets,
        displays: &'a Displays<'a>,
        request: &'a NavRequest,
        screen: Size,
    ) -> GuiResult<Self> {
        let center = (screen.width / 2) as i32;
        let width = screen.width - screen.width / 2 - SLIDER_MARGIN;

        // Right of the center, left of it, and centered under it.
        let columns = [center, center - width as i32, center - width as i32 / 2];
        let rows = [ROW_A, ROW_B, ROW_D];

        let slider = move |n: usize| -> GuiResult<Slider<'a>> {
            let number = &displays.numbers[n];
            let (min, max) = RANGES[n];
            Ok(Slider::new(
                Rectangle::new(
                    Point::new(columns[n], rows[n]),
                    Size::new(width, SLIDER_HEIGHT),
                ),
                SLIDER_STYLE,
                min,
                max,
                min,
            )?
            .on_value(move |value, canvas| number.set_value(value, canvas)))
        };
        let sliders = [slider(0)?, slider(1)?, slider(2)?];

        let nav_width = nav_size(screen).width as i32;
        let nav = move |n: usize| -> GuiResult<Button<'a>> {
            Ok(Button::new(
                Point::new(n as i32 * nav_width, 0),
                SCREEN_BG,
                assets.nav_images(n),
                ButtonMode::Momentary,
            )?
            .on_click(move |_| request.set(n)))
        };
        let navs = [nav(0)?, nav(1)?, nav(2)?];

        Ok(Self { sliders, navs })
    }
}

/// The three pages.
pub struct Pages<'a> {
    pub pages: [Page<'a>; NAV_COUNT],
}

impl<'a> Pages<'a> {
    pub fn new(displays: &'a Displays<'a>, controls: &'a Controls<'a>) -> GuiResult<Self> {
        let [l0a, l0b, l1a, l1b] = &displays.labels;
        let [n2a, n2b, n2c] = &displays.numbers;
        let [s2a, s2b, s2c] = &controls.sliders;

        Ok(Self {
            pages: [
                Page::new(&[l0a, l0b])?,
                Page::new(&[l1a, l1b])?,
                Page::new(&[n2a, s2a, n2b, s2b, n2c, s2c])?,
            ],
        })
    }
}

// ---------------------------------------------------------------------------
// Navigation group
// ---------------------------------------------------------------------------

/// Router plus the page-switching rules of the nav bar.
pub struct NavGroup<'a> {
    router: Router<'a>,
    navs: [&'a Button<'a>; NAV_COUNT],
    pages: [&'a Page<'a>; NAV_COUNT],
    request: &'a NavRequest,
    active: Option<usize>,
}

impl<'a> NavGroup<'a> {
    pub fn new(
        controls: &'a Controls<'a>,
        pages: &'a Pages<'a>,
        request: &'a NavRequest,
    ) -> GuiResult<Self> {
        let [nav_0, nav_1, nav_2] = &controls.navs;
        let [page_0, page_1, page_2] = &pages.pages;

        Ok(Self {
            router: Router::new(&[nav_0, nav_1, nav_2])?,
            navs: [nav_0, nav_1, nav_2],
            pages: [page_0, page_1, page_2],
            request,
            active: None,
        })
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn router(&self) -> &Router<'a> {
        &self.router
    }

    /// Make `page` the active page.
    ///
    /// The first call paints every nav button and clears every page; later
    /// calls only touch the outgoing and incoming ones.
    pub fn select(&mut self, page: usize, canvas: &mut dyn Canvas) {
        let page = page.min(NAV_COUNT - 1);
        match self.active {
            Some(old) if old == page => return,
            Some(old) => self.hide(old, false, canvas),
            None => {
                for n in 0..NAV_COUNT {
                    self.hide(n, true, canvas);
                }
            }
        }

        info!("Showing page {}", page);
        self.navs[page].set_enabled(false, false, canvas);
        self.pages[page].set_visible(true, canvas);
        self.router.set_page(Some(self.pages[page]));
        self.active = Some(page);
    }

    fn hide(&self, page: usize, force_draw: bool, canvas: &mut dyn Canvas) {
        self.navs[page].set_enabled(true, force_draw, canvas);
        self.pages[page].set_visible(false, canvas);
    }

    /// Route one event, then apply any page change it asked for.
    pub fn handle(&mut self, event: &TouchEvent, canvas: &mut dyn Canvas) -> bool {
        let claimed = self.router.dispatch(event, canvas);
        if let Some(page) = self.request.take() {
            self.select(page, canvas);
        }
        claimed
    }

    /// Periodic work of the active page.
    pub fn update(&self, canvas: &mut dyn Canvas) {
        self.router.update(canvas);
    }
}
