//! Gesture focus register and the context handed to widgets with each event.
//!
//! At most one widget owns an in-progress touch gesture. It claims focus on
//! the `Down` that starts the gesture and releases it on the matching `Up`.
//! While focus is held, the routing layer delivers events to the holder only.
//!
//! The register is plain data passed by `&mut` through [`Context`]; nothing
//! in this crate keeps it in a global.

use log::{debug, warn};

use crate::canvas::Canvas;

/// Identity of a widget, derived from its address.
///
/// Widgets live in long-lived storage and are only ever referenced while
/// registered, so the address is stable for as long as anyone compares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(usize);

impl WidgetId {
    pub fn of<W: ?Sized>(widget: &W) -> Self {
        Self((widget as *const W).cast::<()>() as usize)
    }
}

/// How the focus register relates to one particular widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    /// Nobody holds focus
    Free,
    /// The widget asking holds focus
    Held,
    /// Some other widget holds focus
    Other(WidgetId),
}

/// The single, nullable focus register.
#[derive(Debug, Default)]
pub struct Focus {
    holder: Option<WidgetId>,
}

impl Focus {
    /// An empty register, as at boot.
    pub const fn new() -> Self {
        Self { holder: None }
    }

    pub fn holder(&self) -> Option<WidgetId> {
        self.holder
    }

    pub fn is_free(&self) -> bool {
        self.holder.is_none()
    }

    pub fn state_for(&self, id: WidgetId) -> FocusState {
        match self.holder {
            None => FocusState::Free,
            Some(holder) if holder == id => FocusState::Held,
            Some(holder) => FocusState::Other(holder),
        }
    }

    /// Give focus to `id`. Re-claiming by the current holder is a no-op.
    ///
    /// # Panics
    /// If another widget holds focus: the router let two widgets start
    /// gestures at once.
    pub fn claim(&mut self, id: WidgetId) {
        match self.state_for(id) {
            FocusState::Held => {}
            FocusState::Free => {
                debug!("Focus claimed by {:?}", id);
                self.holder = Some(id);
            }
            FocusState::Other(holder) => {
                panic!("focus claimed by {:?} while held by {:?}", id, holder)
            }
        }
    }

    /// Drop focus if `id` holds it.
    pub fn release(&mut self, id: WidgetId) {
        match self.state_for(id) {
            FocusState::Held => {
                debug!("Focus released by {:?}", id);
                self.holder = None;
            }
            FocusState::Free => {}
            FocusState::Other(holder) => {
                warn!("{:?} tried to release focus held by {:?}", id, holder);
            }
        }
    }

    /// Unconditionally empty the register.
    pub fn clear(&mut self) {
        self.holder = None;
    }

    /// Entry check for input-capable widgets: returns whether `id` holds focus.
    ///
    /// # Panics
    /// If another widget holds focus. Events must be routed to the focus
    /// holder only, so reaching here means the routing layer is broken.
    pub fn enter(&self, id: WidgetId) -> bool {
        match self.state_for(id) {
            FocusState::Free => false,
            FocusState::Held => true,
            FocusState::Other(holder) => panic!(
                "{:?} received an event while {:?} holds focus",
                id, holder
            ),
        }
    }
}

/// Everything a widget may touch while handling one event.
pub struct Context<'c> {
    pub canvas: &'c mut dyn Canvas,
    pub focus: &'c mut Focus,
}

impl<'c> Context<'c> {
    pub fn new(canvas: &'c mut dyn Canvas, focus: &'c mut Focus) -> Self {
        Self { canvas, focus }
    }
}
