//! Headless display driver implementation.
//!
//! Renders nowhere; keeps enough bookkeeping to observe what a real backend
//! would have been asked to do.

use crate::display::driver::DisplayDriver;
use crate::display::messages::{ControlQuery, DisplayError};
use crate::format::VideoFormat;
use crate::picture::{Overlay, Picture, Tick};
use log::{debug, info, trace};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Frame counters shared between a headless driver and whoever observes it.
#[derive(Debug, Default)]
pub struct HeadlessStats {
    prepared: AtomicU64,
    displayed: AtomicU64,
}

impl HeadlessStats {
    pub fn prepared(&self) -> u64 {
        self.prepared.load(Ordering::Relaxed)
    }

    pub fn displayed(&self) -> u64 {
        self.displayed.load(Ordering::Relaxed)
    }
}

pub struct HeadlessDisplayDriver {
    name: String,
    format: VideoFormat,
    width_px: u32,
    height_px: u32,
    last_date: Option<Tick>,
    stats: Arc<HeadlessStats>,
}

impl HeadlessDisplayDriver {
    pub fn new(name: impl Into<String>, format: &VideoFormat, width_px: u32, height_px: u32) -> Self {
        let name = name.into();
        info!(
            "HeadlessDisplayDriver[{}]: open {} on {}x{}",
            name, format, width_px, height_px
        );
        Self {
            name,
            format: format.clone(),
            width_px,
            height_px,
            last_date: None,
            stats: Arc::new(HeadlessStats::default()),
        }
    }

    pub fn stats(&self) -> Arc<HeadlessStats> {
        Arc::clone(&self.stats)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }

    pub fn format(&self) -> &VideoFormat {
        &self.format
    }
}

impl DisplayDriver for HeadlessDisplayDriver {
    fn prepare(&mut self, picture: &Picture, overlay: Option<&Overlay>, date: Tick) {
        trace!(
            "HeadlessDisplayDriver[{}]: prepare {}x{} at {} ({} overlay regions)",
            self.name,
            picture.format().visible_width,
            picture.format().visible_height,
            date,
            overlay.map_or(0, |o| o.regions.len())
        );
        self.last_date = Some(date);
        self.stats.prepared.fetch_add(1, Ordering::Relaxed);
    }

    fn display(&mut self, _picture: &Picture) {
        trace!(
            "HeadlessDisplayDriver[{}]: display (date {:?})",
            self.name,
            self.last_date
        );
        self.stats.displayed.fetch_add(1, Ordering::Relaxed);
    }

    fn control(&mut self, query: ControlQuery) -> Result<(), DisplayError> {
        match query {
            ControlQuery::DisplaySize(size) => {
                debug!(
                    "HeadlessDisplayDriver[{}]: resize {}x{} -> {}x{}",
                    self.name, self.width_px, self.height_px, size.width, size.height
                );
                self.width_px = size.width;
                self.height_px = size.height;
                Ok(())
            }
            ControlQuery::SourceAspect | ControlQuery::SourceCrop | ControlQuery::SourcePlace => {
                Ok(())
            }
            ControlQuery::Unknown(code) => Err(DisplayError::Unsupported(code)),
        }
    }

    fn close(&mut self) {
        info!(
            "HeadlessDisplayDriver[{}]: close after {} frames",
            self.name,
            self.stats.displayed()
        );
    }
}
