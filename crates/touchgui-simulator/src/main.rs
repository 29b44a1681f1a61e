//! Desktop simulator for the touchgui navigation demo.
//!
//! Builds the three-page navigation demo on top of `touchgui-core`, drives it
//! with touch gestures and writes the final screen to a PNG.
//!
//! - By default a built-in tour visits every page and moves every slider.
//! - `--replay FILE` plays back a recording instead; `--record FILE` saves
//!   the session's gestures.
//! - With the `window` feature, `--window` opens an SDL window where the
//!   mouse stands in for the touch panel.
//!
//! Set `RUST_LOG=debug` (or `trace`) to follow focus and page changes.

mod assets;
mod demo;
mod script;
#[cfg(feature = "window")]
mod window;

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::Parser;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
use log::info;

use touchgui_core::{
    Bitmap, Canvas, FrameBuffer, GuiResult, ScriptedTouch, TouchConfig, TouchSource,
};

use crate::assets::{Assets, SCREEN_BG};
use crate::demo::{Controls, Displays, NavGroup, NavRequest, Pages};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// PNG file the final screen is written to
    #[arg(short, long, default_value = "touchgui.png")]
    out: PathBuf,

    /// Pixel scale of the PNG and the window
    #[arg(short, long, default_value_t = 2)]
    scale: u32,

    /// Page shown at startup
    #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..3))]
    page: u8,

    /// Replay a gesture recording instead of the built-in tour
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Save this session's gestures to a file
    #[arg(long)]
    record: Option<PathBuf>,

    /// Open an interactive window instead of replaying gestures
    #[cfg(feature = "window")]
    #[arg(long)]
    window: bool,
}

/// Construction errors are authoring mistakes in the demo layout.
fn built<T>(result: GuiResult<T>) -> anyhow::Result<T> {
    result.map_err(|e| anyhow!("building the demo: {e}"))
}

fn write_png(fb: &FrameBuffer, screen: Size, scale: u32, path: &Path) -> anyhow::Result<()> {
    let mut display = SimulatorDisplay::<Rgb565>::new(screen);
    display.write(
        Point::zero(),
        &Bitmap::new(screen.width, screen.height, fb.pixels()),
    );

    let output_settings = OutputSettingsBuilder::new().scale(scale).build();
    display
        .to_rgb_output_image(&output_settings)
        .save_png(path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = TouchConfig::default();
    let screen = config.screen();
    info!("Starting touchgui simulator ({}x{})", screen.width, screen.height);

    let assets = Assets::bake(screen);
    let digits = assets.digit_set();
    let request = NavRequest::default();
    let displays = built(Displays::new(&assets, &digits, screen))?;
    let controls = built(Controls::new(&assets, &displays, &request, screen))?;
    let pages = built(Pages::new(&displays, &controls))?;
    let mut group = built(NavGroup::new(&controls, &pages, &request))?;

    let mut fb = FrameBuffer::filled(screen, SCREEN_BG);
    group.select(usize::from(args.page), &mut fb);

    #[cfg(feature = "window")]
    if args.window {
        let recorded = window::run(&mut group, &mut fb, config, args.scale)?;
        if let Some(path) = &args.record {
            script::save(path, &recorded)?;
        }
        return write_png(&fb, screen, args.scale, &args.out);
    }

    let events = match &args.replay {
        Some(path) => script::load(path)?,
        None => script::tour(&config),
    };
    info!("Replaying {} touch events", events.len());

    let mut source = ScriptedTouch::new(&events);
    let mut claimed = 0;
    while source.remaining() > 0 {
        let event = source.get_event();
        if group.handle(&event, &mut fb) {
            claimed += 1;
        }
        group.update(&mut fb);
    }
    info!(
        "{} of {} events claimed, ending on page {:?}",
        claimed,
        events.len(),
        group.active()
    );

    if let Some(path) = &args.record {
        script::save(path, &events)?;
    }
    write_png(&fb, screen, args.scale, &args.out)
}
