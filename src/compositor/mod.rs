// src/compositor/mod.rs
//! Compositor - fans one picture stream out to N region displays.
//!
//! The compositor loads a partitioning algorithm, creates one `Region`
//! (window + display) per algorithm output and implements the uniform
//! display contract on top of them:
//!
//! - `prepare` splits the picture and prepares every region display
//! - `display` shows every prepared region picture and releases it
//! - `control` recomputes region sizes when the display size changes
//! - `close` tears regions down in reverse creation order
//!
//! ## Threading Model
//! Frame calls happen on one caller thread. Region windows report input
//! from their own threads through `WindowOwner`: resizes are applied inline
//! under the region lock, everything else is queued and handled by
//! `process_events` on the caller thread.

pub mod region;


use crate::config::{RegionFailurePolicy, SplitterConfig};
use crate::display::driver::DisplayDriver;
use crate::display::messages::{
    ButtonMask, ControlQuery, DisplayError, MouseEvent, WindowEvent,
};
use crate::display::placement::DisplayPlacement;
use crate::error::{RegionStage, SplitterError};
use crate::format::VideoFormat;
use crate::picture::{Overlay, Picture, Tick};
use crate::splitter::{AlgorithmRegistry, PartitioningAlgorithm, RegionDescriptor, SPLITTER_CAPABILITY};
use crate::window::{
    DisplayRequest, ParentWindow, RegionEvent, WindowConfig, WindowFactory, WindowOwner,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, error, info, trace, warn};
use std::sync::Arc;

pub use region::Region;

pub struct Compositor {
    source: VideoFormat,
    placement: DisplayPlacement,
    algorithm_name: String,
    algorithm: Option<Box<dyn PartitioningAlgorithm>>,
    outputs: Vec<RegionDescriptor>,
    regions: Vec<Arc<Region>>,
    /// Pictures from the last `prepare`, one slot per region.
    pictures: Vec<Option<Picture>>,
    events: Receiver<RegionEvent>,
    parent: Option<ParentWindow>,
    held_buttons: ButtonMask,
}

impl Compositor {
    /// Opens a compositor for `source`.
    ///
    /// Fails without leaving anything behind: on error every region created
    /// so far is destroyed in reverse order and the algorithm is released.
    /// With `RegionFailurePolicy::Tolerate`, a region whose window or display
    /// cannot be created is kept without output instead.
    pub fn open(
        source: &VideoFormat,
        config: &SplitterConfig,
        registry: &AlgorithmRegistry,
        factory: &dyn WindowFactory,
        parent: Option<ParentWindow>,
    ) -> Result<Self, SplitterError> {
        let name = config.algorithm_name().to_string();
        let constructor = registry.resolve(&name).ok_or_else(|| {
            error!("Compositor: no {} module named {:?}", SPLITTER_CAPABILITY, name);
            SplitterError::ModuleNotFound(name.clone())
        })?;
        info!("Compositor: using {} module {:?}", SPLITTER_CAPABILITY, name);

        let source = source.apply_rotation();
        let algorithm = constructor(&source, config).map_err(|e| {
            error!("Compositor: {:?} failed to initialize: {:#}", name, e);
            SplitterError::AlgorithmCreateFailed {
                name: name.clone(),
                source: e,
            }
        })?;

        let outputs = algorithm.outputs().to_vec();
        let count = outputs.len();
        if count == 0 {
            warn!("Compositor: {:?} declares no outputs, nothing will be shown", name);
        }

        let mut regions = Vec::new();
        regions
            .try_reserve_exact(count)
            .map_err(|_| SplitterError::AllocationFailed("region array"))?;
        let mut pictures = Vec::new();
        pictures
            .try_reserve_exact(count)
            .map_err(|_| SplitterError::AllocationFailed("picture array"))?;
        pictures.resize_with(count, || None);

        let (events_tx, events) = unbounded();
        let mut compositor = Compositor {
            source,
            placement: config.placement,
            algorithm_name: name,
            algorithm: Some(algorithm),
            outputs,
            regions,
            pictures,
            events,
            parent,
            held_buttons: ButtonMask::empty(),
        };

        for index in 0..count {
            if let Err(e) = compositor.add_region(index, config, factory, &events_tx) {
                error!("Compositor: open failed: {}", e);
                compositor.close();
                return Err(e);
            }
        }

        info!(
            "Compositor: {:?} ready with {} regions for {}",
            compositor.algorithm_name, count, compositor.source
        );
        Ok(compositor)
    }

    fn add_region(
        &mut self,
        index: usize,
        config: &SplitterConfig,
        factory: &dyn WindowFactory,
        events: &Sender<RegionEvent>,
    ) -> Result<(), SplitterError> {
        let output = self.outputs[index].clone();
        let (width, height) = match self.algorithm.as_ref() {
            Some(algorithm) => algorithm.default_display_size(&output.format, &self.placement),
            None => (output.format.visible_width, output.format.visible_height),
        };

        let region = Arc::new(Region::new(index, width, height));
        self.regions.push(Arc::clone(&region));
        if !output.active {
            debug!("Compositor: region {} inactive, no window or display", index);
            return Ok(());
        }

        let tolerate = config.region_failure == RegionFailurePolicy::Tolerate;
        let wcfg = WindowConfig {
            width,
            height,
            ..config.window
        };
        let owner = WindowOwner::new(&region, events.clone());

        let mut window = match factory.new_window(&wcfg, owner.clone()) {
            Ok(window) => window,
            Err(e) => return creation_failed(index, RegionStage::Window, e, tolerate),
        };
        if let Err(e) = window.enable(&wcfg) {
            drop(window);
            return creation_failed(index, RegionStage::Enable, e, tolerate);
        }

        let display = factory.new_display(DisplayRequest {
            index,
            module: &output.module,
            format: &output.format,
            window: &wcfg,
            owner: &owner,
        });

        let mut state = region.lock();
        match display {
            Ok(mut display) => {
                // The window may have been resized while the display was
                // being created.
                if (state.width, state.height) != (width, height) {
                    display.set_size(state.width, state.height);
                }
                state.display = Some(display);
                state.window = Some(window);
                debug!(
                    "Compositor: region {} ready, {:?} at {}x{}",
                    index, output.module, state.width, state.height
                );
                Ok(())
            }
            Err(e) if tolerate => {
                state.window = Some(window);
                drop(state);
                creation_failed(index, RegionStage::Display, e, tolerate)
            }
            Err(e) => {
                drop(state);
                window.disable();
                drop(window);
                creation_failed(index, RegionStage::Display, e, tolerate)
            }
        }
    }

    /// Splits `picture` and prepares every region that has a display.
    ///
    /// Filter failures and missing region pictures are absorbed: the
    /// affected regions simply show nothing for this frame.
    pub fn prepare(&mut self, picture: &Picture, overlay: Option<&Overlay>, date: Tick) {
        self.process_events();

        let Some(algorithm) = self.algorithm.as_mut() else {
            return;
        };
        let partition = match algorithm.filter(picture.clone()) {
            Ok(partition) => partition,
            Err(e) => {
                warn!("Compositor: filter failed, frame {} not shown: {:#}", date, e);
                Vec::new()
            }
        };
        if partition.len() > self.regions.len() {
            warn!(
                "Compositor: filter produced {} pictures for {} regions",
                partition.len(),
                self.regions.len()
            );
        }

        let mut partition = partition.into_iter();
        for (region, slot) in self.regions.iter().zip(self.pictures.iter_mut()) {
            *slot = partition.next().flatten();
            let Some(pic) = slot.as_ref() else {
                continue;
            };
            let prepared = {
                let mut state = region.lock();
                match state.display.as_mut() {
                    Some(display) => {
                        display.prepare(pic, overlay, date);
                        true
                    }
                    None => false,
                }
            };
            if !prepared {
                *slot = None;
            }
        }
    }

    /// Shows the pictures computed by the last `prepare` and releases them.
    ///
    /// `_picture` is the frame handed to `prepare`; region pictures are the
    /// ones kept from that call.
    pub fn display(&mut self, _picture: &Picture) {
        for (region, slot) in self.regions.iter().zip(self.pictures.iter_mut()) {
            let picture = slot.take();
            let mut state = region.lock();
            if let (Some(display), Some(pic)) = (state.display.as_mut(), picture.as_ref()) {
                display.display(pic);
            }
            drop(picture);
        }
    }

    pub fn control(&mut self, query: ControlQuery) -> Result<(), DisplayError> {
        match query {
            ControlQuery::DisplaySize(size) => {
                info!(
                    "Compositor: display size {}x{}",
                    size.width, size.height
                );
                self.placement.width = size.width;
                self.placement.height = size.height;
                let Some(algorithm) = self.algorithm.as_ref() else {
                    return Ok(());
                };
                for (region, output) in self.regions.iter().zip(&self.outputs) {
                    let (width, height) =
                        algorithm.default_display_size(&output.format, &self.placement);
                    region.resize(width, height, |_, _| {});
                }
                Ok(())
            }
            ControlQuery::SourceAspect | ControlQuery::SourceCrop | ControlQuery::SourcePlace => {
                debug!("Compositor: {:?} acknowledged", query);
                Ok(())
            }
            ControlQuery::Unknown(code) => {
                error!("Compositor: unsupported control query {}", code);
                Err(DisplayError::Unsupported(code))
            }
        }
    }

    /// Handles input queued by region windows. Mouse events go through the
    /// algorithm's mapping; mapped events, key presses and close requests are
    /// forwarded to the parent window. Returns the number of events handled.
    pub fn process_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(RegionEvent { index, event }) = self.events.try_recv() {
            handled += 1;
            match event {
                WindowEvent::Mouse(mouse) => {
                    let Some(algorithm) = self.algorithm.as_mut() else {
                        continue;
                    };
                    match algorithm.mouse_map(index, &mouse) {
                        Some(mapped) => {
                            self.track_buttons(&mapped);
                            self.forward(WindowEvent::Mouse(mapped));
                        }
                        None => trace!("Compositor: mouse event from region {} dropped", index),
                    }
                }
                WindowEvent::Resized(size) => {
                    if let Some(region) = self.regions.get(index) {
                        region.resize(size.width, size.height, |_, _| {});
                    }
                }
                other => {
                    debug!("Compositor: region {} reported {:?}", index, other);
                    self.forward(other);
                }
            }
        }
        handled
    }

    fn track_buttons(&mut self, event: &MouseEvent) {
        match *event {
            MouseEvent::Pressed(button) => self.held_buttons.insert(button.mask()),
            MouseEvent::Released(button) => self.held_buttons.remove(button.mask()),
            MouseEvent::Moved { .. } | MouseEvent::DoubleClick(_) => {}
        }
    }

    fn forward(&self, event: WindowEvent) {
        match &self.parent {
            Some(parent) => parent.report(event),
            None => trace!("Compositor: no parent window for {:?}", event),
        }
    }

    /// Tears down every region in reverse order, then releases the
    /// algorithm. Calling it again is a no-op.
    pub fn close(&mut self) {
        if self.algorithm.is_none() && self.regions.is_empty() {
            return;
        }
        self.pictures.clear();
        while let Some(region) = self.regions.pop() {
            region.teardown();
        }
        while self.events.try_recv().is_ok() {}
        if self.algorithm.take().is_some() {
            info!(
                "Compositor: released {} module {:?}",
                SPLITTER_CAPABILITY, self.algorithm_name
            );
        }
        self.outputs.clear();
    }

    pub fn is_open(&self) -> bool {
        self.algorithm.is_some()
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn regions(&self) -> &[Arc<Region>] {
        &self.regions
    }

    pub fn outputs(&self) -> &[RegionDescriptor] {
        &self.outputs
    }

    pub fn algorithm_name(&self) -> &str {
        &self.algorithm_name
    }

    /// The source format after orientation was applied.
    pub fn source(&self) -> &VideoFormat {
        &self.source
    }

    pub fn placement(&self) -> &DisplayPlacement {
        &self.placement
    }

    /// Buttons held according to the mouse events forwarded so far.
    pub fn held_buttons(&self) -> ButtonMask {
        self.held_buttons
    }
}

fn creation_failed(
    index: usize,
    stage: RegionStage,
    e: anyhow::Error,
    tolerate: bool,
) -> Result<(), SplitterError> {
    if tolerate {
        warn!(
            "Compositor: region {} {} failed, continuing without output: {:#}",
            index, stage, e
        );
        Ok(())
    } else {
        Err(SplitterError::region(index, stage, e))
    }
}

impl DisplayDriver for Compositor {
    fn prepare(&mut self, picture: &Picture, overlay: Option<&Overlay>, date: Tick) {
        Compositor::prepare(self, picture, overlay, date);
    }

    fn display(&mut self, picture: &Picture) {
        Compositor::display(self, picture);
    }

    fn control(&mut self, query: ControlQuery) -> Result<(), DisplayError> {
        Compositor::control(self, query)
    }

    fn close(&mut self) {
        Compositor::close(self);
    }
}

impl Drop for Compositor {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("algorithm", &self.algorithm_name)
            .field("source", &self.source)
            .field("regions", &self.regions)
            .finish()
    }
}
