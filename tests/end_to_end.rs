//! End-to-end tests driving the compositor through the public API with the
//! headless window factory and the built-in algorithms.

use anyhow::Result;
use serde_json::json;
use test_log::test;
use vidsplit::display::messages::MouseEvent;
use vidsplit::window::{DisplayRequest, HeadlessFactory, Window, WindowConfig, WindowFactory};
use vidsplit::{
    AlgorithmRegistry, Chroma, Compositor, ControlQuery, DisplayDriver, DisplaySize, ParentWindow,
    Picture, RegionFailurePolicy, RegionStage, SplitterConfig, SplitterError, VideoFormat,
    WindowEvent, WindowOwner,
};

fn source() -> VideoFormat {
    VideoFormat::new(Chroma::I420, 640, 360)
}

fn wall(cols: u32, rows: u32) -> SplitterConfig {
    let mut cfg = SplitterConfig::with_algorithm("wall");
    cfg.set_option("cols", json!(cols));
    cfg.set_option("rows", json!(rows));
    cfg
}

fn run_frames(compositor: &mut Compositor, frames: i64) {
    let fmt = compositor.source().clone();
    for date in 0..frames {
        let picture = Picture::new(fmt.clone(), date * 40_000);
        compositor.prepare(&picture, None, picture.date());
        compositor.display(&picture);
    }
}

#[test]
fn wall_shows_every_frame_on_every_tile() {
    let registry = AlgorithmRegistry::with_builtins();
    let factory = HeadlessFactory::new();
    let mut compositor = Compositor::open(&source(), &wall(2, 2), &registry, &factory, None).unwrap();

    assert_eq!(compositor.region_count(), 4);
    run_frames(&mut compositor, 10);

    let stats = factory.stats();
    assert_eq!(stats.len(), 4);
    for (_, s) in &stats {
        assert_eq!(s.prepared(), 10);
        assert_eq!(s.displayed(), 10);
    }
    compositor.close();
}

#[test]
fn wall_inactive_tiles_get_no_display() {
    let registry = AlgorithmRegistry::with_builtins();
    let factory = HeadlessFactory::new();
    let mut cfg = wall(2, 2);
    cfg.set_option("active", json!([0, 3]));

    let mut compositor = Compositor::open(&source(), &cfg, &registry, &factory, None).unwrap();
    run_frames(&mut compositor, 3);

    assert_eq!(compositor.region_count(), 4);
    let indices: Vec<usize> = factory.stats().iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![0, 3]);
    assert!(!compositor.regions()[1].has_window());
    assert!(factory.stats().iter().all(|(_, s)| s.displayed() == 3));
}

#[test]
fn default_algorithm_is_used_when_unset() {
    let registry = AlgorithmRegistry::with_builtins();
    let factory = HeadlessFactory::new();

    let compositor =
        Compositor::open(&source(), &SplitterConfig::default(), &registry, &factory, None).unwrap();

    assert_eq!(compositor.algorithm_name(), "wall");
    assert_eq!(compositor.region_count(), 9);
}

#[test]
fn unknown_display_module_fails_or_is_tolerated() {
    let registry = AlgorithmRegistry::with_builtins();
    let mut cfg = SplitterConfig::with_algorithm("clone");
    cfg.set_option("modules", json!(["headless", "no_such_backend"]));

    let factory = HeadlessFactory::new();
    let err = Compositor::open(&source(), &cfg, &registry, &factory, None).unwrap_err();
    assert!(matches!(
        err,
        SplitterError::RegionCreateFailed { index: 1, stage: RegionStage::Display, .. }
    ));

    cfg.region_failure = RegionFailurePolicy::Tolerate;
    let factory = HeadlessFactory::new();
    let mut compositor = Compositor::open(&source(), &cfg, &registry, &factory, None).unwrap();
    run_frames(&mut compositor, 2);

    assert_eq!(compositor.region_count(), 2);
    assert_eq!(factory.stats().len(), 1);
    assert_eq!(factory.stats()[0].1.displayed(), 2);
}

#[test]
fn oversized_clone_count_fails_to_open() {
    let registry = AlgorithmRegistry::with_builtins();
    let factory = HeadlessFactory::new();
    let mut cfg = SplitterConfig::with_algorithm("clone");
    cfg.set_option("count", json!(u64::MAX));

    let err = Compositor::open(&source(), &cfg, &registry, &factory, None).unwrap_err();

    assert!(matches!(err, SplitterError::AlgorithmCreateFailed { ref name, .. } if name == "clone"));
    assert!(factory.owners().is_empty());
}

#[test]
fn wall_mouse_events_reach_the_parent_in_source_coordinates() {
    let registry = AlgorithmRegistry::with_builtins();
    let factory = HeadlessFactory::new();
    let (parent, events) = ParentWindow::new();
    let mut compositor =
        Compositor::open(&source(), &wall(2, 2), &registry, &factory, Some(parent)).unwrap();

    // Bottom right tile of a 640x360 source starts at (320, 180).
    factory.owners()[3].mouse_event(MouseEvent::Moved { x: 5, y: 7 });
    factory.owners()[0].close_requested();
    compositor.process_events();

    let received: Vec<WindowEvent> = events.try_iter().collect();
    assert_eq!(
        received,
        vec![
            WindowEvent::Mouse(MouseEvent::Moved { x: 325, y: 187 }),
            WindowEvent::CloseRequested,
        ]
    );
}

#[test]
fn display_size_change_reaches_headless_regions() {
    let registry = AlgorithmRegistry::with_builtins();
    let factory = HeadlessFactory::new();
    let mut compositor =
        Compositor::open(&source(), &SplitterConfig::with_algorithm("clone"), &registry, &factory, None)
            .unwrap();

    compositor
        .control(ControlQuery::DisplaySize(DisplaySize { width: 800, height: 450 }))
        .unwrap();

    assert!(compositor.regions().iter().all(|r| r.size() == (800, 450)));
}

/// Serves every display request with a nested clone compositor.
struct NestedFactory {
    windows: HeadlessFactory,
    inner: HeadlessFactory,
    registry: AlgorithmRegistry,
}

impl WindowFactory for NestedFactory {
    fn new_window(&self, cfg: &WindowConfig, owner: WindowOwner) -> Result<Box<dyn Window>> {
        self.windows.new_window(cfg, owner)
    }

    fn new_display(&self, request: DisplayRequest<'_>) -> Result<Box<dyn DisplayDriver>> {
        let inner = Compositor::open(
            request.format,
            &SplitterConfig::with_algorithm("clone"),
            &self.registry,
            &self.inner,
            None,
        )?;
        Ok(Box::new(inner))
    }
}

#[test]
fn compositors_nest_as_displays() {
    let factory = NestedFactory {
        windows: HeadlessFactory::new(),
        inner: HeadlessFactory::new(),
        registry: AlgorithmRegistry::with_builtins(),
    };
    let registry = AlgorithmRegistry::with_builtins();
    let mut outer = Compositor::open(&source(), &wall(2, 1), &registry, &factory, None).unwrap();

    run_frames(&mut outer, 4);

    // Two wall tiles, each cloned twice.
    let stats = factory.inner.stats();
    assert_eq!(stats.len(), 4);
    assert!(stats.iter().all(|(_, s)| s.prepared() == 4 && s.displayed() == 4));

    outer.close();
    assert!(!outer.is_open());
}
