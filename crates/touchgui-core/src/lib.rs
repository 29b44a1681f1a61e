//! Hardware-independent core of the touchgui widget layer
//!
//! This crate contains the platform-agnostic part of a small on-device GUI:
//! touch event dispatch and focus ownership, the stateful input widgets
//! (buttons, sliders), the numeric display, and pages that group widgets and
//! route events to them.
//!
//! Rendering goes through the object-safe [`Canvas`](canvas::Canvas) sink, so
//! any infallible `embedded-graphics` draw target (including the bundled
//! [`FrameBuffer`](framebuffer::FrameBuffer)) can back the UI.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod canvas;
pub mod config;
pub mod error;
pub mod focus;
pub mod framebuffer;
pub mod page;
pub mod router;
pub mod touch;
pub mod widget;

#[cfg(test)]
pub(crate) mod test_support;

pub use canvas::{Bitmap, Canvas, DigitSet, HAlign};
pub use error::{GuiError, GuiResult};
pub use focus::{Context, Focus, FocusState, WidgetId};
pub use framebuffer::FrameBuffer;
pub use page::Page;
pub use router::Router;
pub use config::TouchConfig;
pub use touch::{ContactTracker, ScriptedTouch, TouchEvent, TouchPhase, TouchSource};
pub use widget::{Button, ButtonImages, ButtonMode, Label, Number, Slider, SliderStyle, Widget};
