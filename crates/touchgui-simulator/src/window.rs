//! Interactive mode: an SDL window where the mouse acts as the touch panel.
//!
//! | Input             | Touch                 |
//! |-------------------|-----------------------|
//! | left button down  | contact starts        |
//! | drag              | contact moves         |
//! | left button up    | contact lifts         |
//! | Q / Esc           | quit                  |

use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::{Keycode, MouseButton};
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use log::{info, trace};

use touchgui_core::{Bitmap, Canvas, ContactTracker, FrameBuffer, TouchConfig, TouchEvent};

use crate::demo::NavGroup;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Run until the window is closed. Returns every touch event generated, for
/// recording.
pub fn run(
    group: &mut NavGroup<'_>,
    fb: &mut FrameBuffer,
    config: TouchConfig,
    scale: u32,
) -> anyhow::Result<Vec<TouchEvent>> {
    let screen = config.screen();
    let mut display = SimulatorDisplay::<Rgb565>::new(screen);
    display.write(
        Point::zero(),
        &Bitmap::new(screen.width, screen.height, fb.pixels()),
    );
    fb.mark_clean();

    let output_settings = OutputSettingsBuilder::new().scale(scale).build();
    let mut window = Window::new("touchgui simulator", &output_settings);
    // The SDL window is created lazily by the first `update()`, which must
    // come before `events()`.
    window.update(&display);
    info!("Window open: drag with the left mouse button, Q to quit");

    let mut tracker = ContactTracker::new(config);
    let mut recorded = Vec::new();

    'running: loop {
        let frame_start = Instant::now();

        for event in window.events() {
            let contact = match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. }
                    if keycode == Keycode::Q || keycode == Keycode::Escape =>
                {
                    break 'running;
                }
                SimulatorEvent::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    point,
                } => Some(point),
                SimulatorEvent::MouseMove { point } if tracker.is_touching() => Some(point),
                SimulatorEvent::MouseButtonUp {
                    mouse_btn: MouseButton::Left,
                    ..
                } => None,
                _ => continue,
            };

            let touch = tracker.sample(contact);
            if touch.is_none() {
                continue;
            }
            let claimed = group.handle(&touch, fb);
            trace!("{} claimed={}", touch, claimed);
            recorded.push(touch);
        }

        group.update(fb);

        let Ok(()) = fb.flush(&mut display);
        window.update(&display);

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Window closed after {} touch events", recorded.len());
    Ok(recorded)
}
