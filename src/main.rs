// In src/main.rs

use vidsplit::{
    config::CONFIG,
    display::messages::{MouseButton, MouseEvent},
    window::HeadlessFactory,
    AlgorithmRegistry, Chroma, Compositor, ControlQuery, DisplaySize, ParentWindow, Picture,
    VideoFormat,
};

use anyhow::Context;
use log::{info, warn};

/// Main entry point for the `vidsplit` demo.
///
/// Pushes a synthetic picture stream through a compositor backed by headless
/// windows and displays, then reports what every region received.
fn main() -> anyhow::Result<()> {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting vidsplit...");

    let demo = &CONFIG.demo;
    let splitter = &CONFIG.splitter;
    let source = VideoFormat::new(Chroma::I420, demo.width, demo.height);
    info!(
        "Source {}, algorithm {:?}, {} frames",
        source,
        splitter.algorithm_name(),
        demo.frames
    );

    let registry = AlgorithmRegistry::with_builtins();
    let factory = HeadlessFactory::new();
    let (parent, parent_events) = ParentWindow::new();

    let mut compositor = Compositor::open(&source, splitter, &registry, &factory, Some(parent))
        .context("Failed to open the compositor")?;

    for n in 0..demo.frames {
        let date = i64::from(n) * demo.frame_interval_us;
        let picture = Picture::new(source.clone(), date);
        compositor.prepare(&picture, None, date);
        compositor.display(&picture);

        if n == demo.frames / 2 {
            simulate_input(&factory, &mut compositor)?;
        }
    }
    compositor.process_events();

    for event in parent_events.try_iter() {
        info!("Parent window received {:?}", event);
    }
    for (index, stats) in factory.stats() {
        info!(
            "Region {}: {} prepared, {} displayed",
            index,
            stats.prepared(),
            stats.displayed()
        );
    }

    compositor.close();
    info!("vidsplit finished.");
    Ok(())
}

/// Resizes the first region window, changes the overall display size and
/// moves the mouse over the last region.
fn simulate_input(factory: &HeadlessFactory, compositor: &mut Compositor) -> anyhow::Result<()> {
    let owners = factory.owners();
    let (Some(first), Some(last)) = (owners.first(), owners.last()) else {
        warn!("No region windows, skipping input simulation");
        return Ok(());
    };

    first.resized(640, 360);
    compositor
        .control(ControlQuery::DisplaySize(DisplaySize {
            width: 1280,
            height: 720,
        }))
        .context("Display size change rejected")?;

    last.mouse_event(MouseEvent::Moved { x: 10, y: 10 });
    last.mouse_event(MouseEvent::Pressed(MouseButton::Left));
    last.mouse_event(MouseEvent::Released(MouseButton::Left));
    Ok(())
}
