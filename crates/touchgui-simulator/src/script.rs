//! Touch gesture scripts: the built-in tour and postcard-encoded recordings.

use std::fs;
use std::path::Path;

use anyhow::{Context, anyhow};
use embedded_graphics::prelude::*;
use log::debug;

use touchgui_core::{ContactTracker, TouchConfig, TouchEvent};

/// Builds an event list from raw contact samples, the way a touch controller
/// would report them.
struct Recorder {
    tracker: ContactTracker,
    events: Vec<TouchEvent>,
}

impl Recorder {
    fn new(config: TouchConfig) -> Self {
        Self {
            tracker: ContactTracker::new(config),
            events: Vec::new(),
        }
    }

    fn sample(&mut self, contact: Option<Point>) {
        let event = self.tracker.sample(contact);
        if !event.is_none() {
            self.events.push(event);
        }
    }

    fn tap(&mut self, at: Point) {
        self.sample(Some(at));
        self.sample(Some(at));
        self.sample(None);
    }

    /// Press at `from`, slide to `to` in `steps` samples, lift.
    fn drag(&mut self, from: Point, to: Point, steps: i32) {
        self.sample(Some(from));
        for step in 1..=steps {
            self.sample(Some(from + (to - from) * step / steps));
        }
        self.sample(None);
    }
}

/// Center of nav button `n` on a screen `width` pixels wide.
fn nav_point(width: u32, n: u32) -> Point {
    let nav = width / 3;
    Point::new((n * nav + nav / 2) as i32, 15)
}

/// A walk through every page of the demo, ending on the slider page.
pub fn tour(config: &TouchConfig) -> Vec<TouchEvent> {
    let width = config.screen_width;
    let mut rec = Recorder::new(*config);

    rec.tap(nav_point(width, 1));
    rec.tap(nav_point(width, 2));

    // Right-aligned number: slide from the left end most of the way.
    rec.drag(Point::new(250, 60), Point::new(420, 60), 12);
    // Left-aligned number: slide its slider leftwards.
    rec.drag(Point::new(230, 120), Point::new(60, 120), 12);
    // Centered number.
    rec.drag(Point::new(130, 240), Point::new(300, 240), 12);

    // Slides in from empty space: ignored by every widget.
    rec.drag(Point::new(20, 300), Point::new(200, 240), 6);

    // Tap the disabled nav button of the page we are on: nothing happens.
    rec.tap(nav_point(width, 2));

    debug!("Tour has {} events", rec.events.len());
    rec.events
}

/// Write `events` to `path` as a postcard-encoded sequence.
pub fn save(path: &Path, events: &[TouchEvent]) -> anyhow::Result<()> {
    let bytes =
        postcard::to_allocvec(events).map_err(|e| anyhow!("encoding gesture recording: {e}"))?;
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Read a recording written by [`save`].
pub fn load(path: &Path) -> anyhow::Result<Vec<TouchEvent>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    postcard::from_bytes(&bytes).map_err(|e| anyhow!("decoding {}: {e}", path.display()))
}
