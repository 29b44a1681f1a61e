//! Top-level event router.
//!
//! The router owns the focus register and decides who sees each touch event:
//!
//! 1. `None` events are dropped.
//! 2. While a widget holds focus, the event goes to that widget only.
//! 3. Otherwise the always-present controls (e.g. a navigation bar) are
//!    offered the event in order, then the active page.
//!
//! The main loop polls the touch source, hands each event to
//! [`Router::dispatch`], then runs [`Router::update`] once per pass.

use heapless::Vec;
use log::{debug, trace, warn};

use crate::canvas::Canvas;
use crate::config::MAX_ROUTER_CONTROLS;
use crate::error::{GuiError, GuiResult};
use crate::focus::{Context, Focus, WidgetId};
use crate::page::Page;
use crate::touch::{TouchEvent, TouchSource};
use crate::widget::Widget;

pub struct Router<'a> {
    focus: Focus,
    controls: Vec<&'a dyn Widget, MAX_ROUTER_CONTROLS>,
    page: Option<&'a Page<'a>>,
}

impl<'a> Router<'a> {
    /// Create a router with the given top-level controls and no active page.
    pub fn new(controls: &[&'a dyn Widget]) -> GuiResult<Self> {
        let controls = Vec::from_slice(controls).map_err(|_| GuiError::TooManyControls {
            capacity: MAX_ROUTER_CONTROLS,
        })?;
        Ok(Self {
            focus: Focus::new(),
            controls,
            page: None,
        })
    }

    pub fn focus(&self) -> &Focus {
        &self.focus
    }

    pub fn controls(&self) -> &[&'a dyn Widget] {
        &self.controls
    }

    pub fn page(&self) -> Option<&'a Page<'a>> {
        self.page
    }

    /// Make `page` the page that receives events. Nothing is drawn; showing
    /// and hiding pages is up to the caller (see [`Router::switch_page`]).
    pub fn set_page(&mut self, page: Option<&'a Page<'a>>) {
        self.page = page;
    }

    /// Hide the active page, then show and activate `page`.
    pub fn switch_page(&mut self, page: &'a Page<'a>, canvas: &mut dyn Canvas) {
        if let Some(old) = self.page
            && !core::ptr::eq(old, page)
        {
            old.set_visible(false, canvas);
        }
        debug!("Switching to page with {} widgets", page.len());
        page.set_visible(true, canvas);
        self.page = Some(page);
    }

    /// Look up a widget among the controls and the active page's members.
    fn find(&self, id: WidgetId) -> Option<&'a dyn Widget> {
        self.controls
            .iter()
            .copied()
            .find(|w| w.id() == id)
            .or_else(|| self.page.and_then(|page| page.find(id)))
    }

    /// Route one event. Returns `true` if some widget claimed it.
    pub fn dispatch(&mut self, event: &TouchEvent, canvas: &mut dyn Canvas) -> bool {
        if event.is_none() {
            return false;
        }
        trace!("Dispatching {}", event);

        if let Some(holder) = self.focus.holder() {
            let Some(widget) = self.find(holder) else {
                warn!("Focus holder {:?} is no longer routable, dropping {}", holder, event);
                self.focus.clear();
                return false;
            };
            return widget.event(event, &mut Context::new(canvas, &mut self.focus));
        }

        let mut cx = Context::new(canvas, &mut self.focus);
        if self.controls.iter().any(|control| control.event(event, &mut cx)) {
            return true;
        }
        match self.page {
            Some(page) => page.event(event, &mut cx),
            None => false,
        }
    }

    /// Poll `source` once and dispatch what it returns.
    pub fn poll(&mut self, source: &mut dyn TouchSource, canvas: &mut dyn Canvas) -> bool {
        let event = source.get_event();
        self.dispatch(&event, canvas)
    }

    /// Run the active page's update hook.
    pub fn update(&self, canvas: &mut dyn Canvas) {
        if let Some(page) = self.page {
            page.update(canvas);
        }
    }

    /// Draw the controls, then the active page.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for control in &self.controls {
            control.draw(canvas);
        }
        if let Some(page) = self.page {
            page.draw(canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Bitmap;
    use crate::test_support::{RecordingCanvas, solid};
    use crate::touch::ScriptedTouch;
    use crate::widget::{Button, ButtonImages, ButtonMode};
    use alloc::vec::Vec as StdVec;
    use core::cell::RefCell;
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::prelude::*;

    fn pixels() -> StdVec<Rgb565> {
        solid(20, 10, Rgb565::GREEN)
    }

    fn images(px: &[Rgb565]) -> ButtonImages<'_> {
        let image = Bitmap::new(20, 10, px);
        ButtonImages {
            enabled: image,
            disabled: image,
            pressed: image,
        }
    }

    fn button<'a>(
        px: &'a [Rgb565],
        at: Point,
        name: &'static str,
        log: &'a RefCell<StdVec<&'static str>>,
    ) -> Button<'a> {
        Button::new(at, Rgb565::BLACK, images(px), ButtonMode::Momentary)
            .unwrap()
            .on_click(move |_| log.borrow_mut().push(name))
    }

    #[test]
    fn test_too_many_controls() {
        let px = pixels();
        let log = RefCell::new(StdVec::new());
        let b = button(&px, Point::zero(), "b", &log);
        let controls = [&b as &dyn Widget; MAX_ROUTER_CONTROLS + 1];

        assert_eq!(
            Router::new(&controls).err(),
            Some(GuiError::TooManyControls {
                capacity: MAX_ROUTER_CONTROLS
            })
        );
    }

    #[test]
    fn test_controls_take_priority_over_page() {
        let px = pixels();
        let log = RefCell::new(StdVec::new());
        let nav = button(&px, Point::zero(), "nav", &log);
        let under = button(&px, Point::zero(), "page", &log);
        let page = Page::new(&[&under]).unwrap();
        let mut router = Router::new(&[&nav]).unwrap();
        let mut canvas = RecordingCanvas::new();
        router.switch_page(&page, &mut canvas);

        assert!(router.dispatch(&TouchEvent::down(5, 5), &mut canvas));
        assert!(router.dispatch(&TouchEvent::up(5, 5), &mut canvas));
        assert_eq!(*log.borrow(), ["nav"]);
    }

    #[test]
    fn test_focus_holder_gets_every_event() {
        let px = pixels();
        let log = RefCell::new(StdVec::new());
        let a = button(&px, Point::new(0, 0), "a", &log);
        let b = button(&px, Point::new(50, 0), "b", &log);
        let page = Page::new(&[&a, &b]).unwrap();
        let mut router = Router::new(&[]).unwrap();
        let mut canvas = RecordingCanvas::new();
        router.switch_page(&page, &mut canvas);

        router.dispatch(&TouchEvent::down(5, 5), &mut canvas);
        assert_eq!(router.focus().holder(), Some(a.id()));

        // The contact wanders onto `b`: `a` keeps the gesture.
        assert!(router.dispatch(&TouchEvent::move_to(55, 5), &mut canvas));
        assert!(router.dispatch(&TouchEvent::down(55, 5), &mut canvas));
        assert!(!b.is_pressed());

        assert!(router.dispatch(&TouchEvent::up(55, 5), &mut canvas));
        assert!(router.focus().is_free());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_stale_focus_is_cleared() {
        let px = pixels();
        let log = RefCell::new(StdVec::new());
        let a = button(&px, Point::zero(), "a", &log);
        let first = Page::new(&[&a]).unwrap();
        let second = Page::new(&[]).unwrap();
        let mut router = Router::new(&[]).unwrap();
        let mut canvas = RecordingCanvas::new();
        router.switch_page(&first, &mut canvas);

        router.dispatch(&TouchEvent::down(5, 5), &mut canvas);
        router.switch_page(&second, &mut canvas);

        assert!(!router.dispatch(&TouchEvent::up(5, 5), &mut canvas));
        assert!(router.focus().is_free());

        // Routing works normally afterwards.
        router.switch_page(&first, &mut canvas);
        assert!(router.dispatch(&TouchEvent::down(5, 5), &mut canvas));
    }

    #[test]
    fn test_none_events_are_dropped() {
        let px = pixels();
        let log = RefCell::new(StdVec::new());
        let a = button(&px, Point::zero(), "a", &log);
        let mut router = Router::new(&[&a]).unwrap();
        let mut canvas = RecordingCanvas::new();

        assert!(!router.dispatch(&TouchEvent::none(), &mut canvas));
        assert_eq!(canvas.op_count(), 0);
    }

    #[test]
    fn test_poll_replays_source() {
        let px = pixels();
        let log = RefCell::new(StdVec::new());
        let a = button(&px, Point::zero(), "a", &log);
        let mut router = Router::new(&[&a]).unwrap();
        let mut canvas = RecordingCanvas::new();
        let script = [TouchEvent::down(3, 3), TouchEvent::none(), TouchEvent::up(3, 3)];
        let mut source = ScriptedTouch::new(&script);

        while source.remaining() > 0 {
            router.poll(&mut source, &mut canvas);
        }
        assert_eq!(*log.borrow(), ["a"]);
    }

    #[test]
    fn test_switch_page_hides_previous() {
        let first = Page::new(&[]).unwrap();
        let second = Page::new(&[]).unwrap();
        let mut router = Router::new(&[]).unwrap();
        let mut canvas = RecordingCanvas::new();

        router.switch_page(&first, &mut canvas);
        router.switch_page(&second, &mut canvas);

        assert!(!first.is_visible());
        assert!(second.is_visible());
        assert!(core::ptr::eq(router.page().unwrap(), &second));
    }
}
