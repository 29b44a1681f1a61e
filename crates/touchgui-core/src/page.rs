//! Pages: fixed-capacity groups of widgets shown and hidden together.
//!
//! A page does not own its widgets; it holds references to widgets living in
//! longer-lived storage, so one widget may appear on several pages. Member
//! order is both the draw order and the event priority.

use core::cell::Cell;

use heapless::Vec;
use log::debug;

use alloc::boxed::Box;

use crate::canvas::Canvas;
use crate::config::MAX_PAGE_WIDGETS;
use crate::error::{GuiError, GuiResult};
use crate::focus::{Context, WidgetId};
use crate::touch::TouchEvent;
use crate::widget::{Handler, Widget};

/// An ordered set of up to [`MAX_PAGE_WIDGETS`] widgets.
///
/// Pages start hidden. Like widgets, all state is in cells so a page can be
/// shared between the router and the callbacks that switch pages.
pub struct Page<'a> {
    widgets: Vec<&'a dyn Widget, MAX_PAGE_WIDGETS>,
    visible: Cell<bool>,
    busy: Cell<u32>,
    on_update: Option<Handler<'a>>,
}

impl<'a> Page<'a> {
    /// Build a hidden page from `widgets`, in draw and event-priority order.
    pub fn new(widgets: &[&'a dyn Widget]) -> GuiResult<Self> {
        let widgets = Vec::from_slice(widgets).map_err(|_| GuiError::PageFull {
            capacity: MAX_PAGE_WIDGETS,
        })?;
        Ok(Self {
            widgets,
            visible: Cell::new(false),
            busy: Cell::new(0),
            on_update: None,
        })
    }

    /// Periodic work run by [`Page::update`] while the page is visible, e.g.
    /// refreshing a reading on screen.
    pub fn with_update(mut self, hook: impl Fn(&mut dyn Canvas) + 'a) -> Self {
        self.on_update = Some(Box::new(hook));
        self
    }

    pub fn widgets(&self) -> &[&'a dyn Widget] {
        &self.widgets
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Member with the given id, if it is on this page.
    pub fn find(&self, id: WidgetId) -> Option<&'a dyn Widget> {
        self.widgets.iter().copied().find(|w| w.id() == id)
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Show (draw every member) or hide (erase every member) the page.
    pub fn set_visible(&self, visible: bool, canvas: &mut dyn Canvas) {
        debug!("Page with {} widgets -> visible={}", self.len(), visible);
        self.visible.set(visible);
        if visible {
            self.draw(canvas);
        } else {
            self.erase(canvas);
        }
    }

    /// Draw every member in order. No-op while the page is hidden.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if !self.is_visible() {
            return;
        }
        for widget in &self.widgets {
            widget.draw(canvas);
        }
    }

    /// Ask every member to erase itself, whatever the page's or the member's
    /// own visibility.
    pub fn erase(&self, canvas: &mut dyn Canvas) {
        for widget in &self.widgets {
            widget.erase(canvas);
        }
    }

    /// Offer `event` to members in order until one claims it.
    ///
    /// While focus is held, only the holder sees the event; a page that does
    /// not contain the holder declines. A hidden page claims nothing.
    pub fn event(&self, event: &TouchEvent, cx: &mut Context<'_>) -> bool {
        if !self.is_visible() {
            return false;
        }
        if let Some(holder) = cx.focus.holder() {
            return match self.find(holder) {
                Some(widget) => widget.event(event, cx),
                None => false,
            };
        }
        self.widgets.iter().any(|widget| widget.event(event, cx))
    }

    /// Run the update hook, if any, while the page is visible. Call once per
    /// pass of the main loop.
    pub fn update(&self, canvas: &mut dyn Canvas) {
        if !self.is_visible() {
            return;
        }
        if let Some(hook) = &self.on_update {
            hook(canvas);
        }
    }

    // -----------------------------------------------------------------------
    // Busy counter
    // -----------------------------------------------------------------------
    //
    // Collaborators bump this around long-running work (e.g. to keep the user
    // from navigating away). The page itself never looks at it.

    pub fn busy_begin(&self) {
        self.busy.set(self.busy.get().saturating_add(1));
    }

    pub fn busy_end(&self) {
        self.busy.set(self.busy.get().saturating_sub(1));
    }

    pub fn busy(&self) -> u32 {
        self.busy.get()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get() > 0
    }
}
