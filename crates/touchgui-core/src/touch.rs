//! Touch events and the sources that produce them.
//!
//! The widget layer sees touch input as a stream of discrete [`TouchEvent`]s:
//! exactly one contact at a time, a `Down` always before its matching `Up`,
//! and any number of `Move`s in between (which may land outside every
//! widget). A poll that finds nothing new yields a `None` event.
//!
//! Touch controllers usually report a per-point status instead
//! (touch / stream / release) plus coordinates; [`ContactTracker`] turns
//! successive raw samples into the event stream.

use core::fmt::{Display, Formatter};

use embedded_graphics::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::TouchConfig;

/// Phase of a touch gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPhase {
    /// Nothing changed since the last poll
    None,
    /// Contact started
    Down,
    /// Contact moved while held
    Move,
    /// Contact lifted
    Up,
}

/// A single touch event in framebuffer coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub x: i32,
    pub y: i32,
}

impl TouchEvent {
    pub const fn new(phase: TouchPhase, x: i32, y: i32) -> Self {
        Self { phase, x, y }
    }

    pub const fn none() -> Self {
        Self::new(TouchPhase::None, 0, 0)
    }

    pub const fn down(x: i32, y: i32) -> Self {
        Self::new(TouchPhase::Down, x, y)
    }

    pub const fn move_to(x: i32, y: i32) -> Self {
        Self::new(TouchPhase::Move, x, y)
    }

    pub const fn up(x: i32, y: i32) -> Self {
        Self::new(TouchPhase::Up, x, y)
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_none(&self) -> bool {
        self.phase == TouchPhase::None
    }
}

impl Display for TouchEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let phase = match self.phase {
            TouchPhase::None => "None",
            TouchPhase::Down => "Down",
            TouchPhase::Move => "Move",
            TouchPhase::Up => "Up",
        };
        write!(f, "{phase} @ ({}, {})", self.x, self.y)
    }
}

/// Producer of touch events, polled once per host loop iteration.
pub trait TouchSource {
    /// Non-blocking poll. Returns a `None` event when nothing changed.
    fn get_event(&mut self) -> TouchEvent;
}

/// Converts raw contact samples into [`TouchEvent`]s.
///
/// Feed it the controller's current contact (or `None` when nothing touches
/// the panel) on every poll:
///
/// | previous | current              | event              |
/// |----------|----------------------|--------------------|
/// | released | contact              | `Down`             |
/// | held     | contact, moved       | `Move`             |
/// | held     | contact, same place  | `None`             |
/// | held     | released             | `Up` at last point |
/// | released | released             | `None`             |
#[derive(Debug, Clone)]
pub struct ContactTracker {
    config: TouchConfig,
    last: Option<Point>,
}

impl ContactTracker {
    pub fn new(config: TouchConfig) -> Self {
        Self { config, last: None }
    }

    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    /// Whether a contact is currently held.
    pub fn is_touching(&self) -> bool {
        self.last.is_some()
    }

    /// Feed one raw sample and get the resulting event.
    pub fn sample(&mut self, contact: Option<Point>) -> TouchEvent {
        let contact = contact.map(|p| self.clamp(p));
        match (self.last, contact) {
            (None, None) => TouchEvent::none(),
            (None, Some(p)) => {
                self.last = Some(p);
                TouchEvent::down(p.x, p.y)
            }
            (Some(prev), Some(p)) => {
                let delta = p - prev;
                let threshold = self.config.move_threshold as i32;
                if delta.x.abs() > threshold || delta.y.abs() > threshold {
                    self.last = Some(p);
                    TouchEvent::move_to(p.x, p.y)
                } else {
                    TouchEvent::none()
                }
            }
            (Some(prev), None) => {
                self.last = None;
                TouchEvent::up(prev.x, prev.y)
            }
        }
    }

    fn clamp(&self, p: Point) -> Point {
        let max_x = self.config.screen_width.saturating_sub(1) as i32;
        let max_y = self.config.screen_height.saturating_sub(1) as i32;
        Point::new(p.x.clamp(0, max_x), p.y.clamp(0, max_y))
    }
}

/// Replays a fixed list of events, then reports `None` forever.
#[derive(Debug, Clone)]
pub struct ScriptedTouch<'s> {
    events: &'s [TouchEvent],
    next: usize,
}

impl<'s> ScriptedTouch<'s> {
    pub fn new(events: &'s [TouchEvent]) -> Self {
        Self { events, next: 0 }
    }

    /// Number of events not yet replayed.
    pub fn remaining(&self) -> usize {
        self.events.len() - self.next
    }
}

impl TouchSource for ScriptedTouch<'_> {
    fn get_event(&mut self) -> TouchEvent {
        match self.events.get(self.next) {
            Some(event) => {
                self.next += 1;
                *event
            }
            None => TouchEvent::none(),
        }
    }
}
