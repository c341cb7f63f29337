// src/splitter/mod.rs
//! Partitioning algorithms: how many regions exist, what each one shows,
//! and how one picture is split across them.

pub mod clone;
#[cfg(test)]
pub mod mock;
pub mod registry;
pub mod wall;

use crate::display::messages::MouseEvent;
use crate::display::placement::{default_display_size, DisplayPlacement};
use crate::format::VideoFormat;
use crate::picture::Picture;
use anyhow::Result;

pub use registry::{AlgorithmConstructor, AlgorithmRegistry, SPLITTER_CAPABILITY};

/// Static description of one output region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionDescriptor {
    /// Display backend for this region; empty selects the default backend.
    pub module: String,
    /// Format of the pictures this region receives.
    pub format: VideoFormat,
    /// Inactive regions get neither window nor display and never receive
    /// pictures.
    pub active: bool,
}

impl RegionDescriptor {
    pub fn new(module: impl Into<String>, format: VideoFormat) -> Self {
        Self {
            module: module.into(),
            format,
            active: true,
        }
    }

    pub fn inactive(format: VideoFormat) -> Self {
        Self {
            module: String::new(),
            format,
            active: false,
        }
    }
}

/// Output of one `filter` call: one slot per region, `None` where a region
/// gets no picture this frame. May be shorter than the region count.
pub type FramePartition = Vec<Option<Picture>>;

/// A pluggable one-to-many picture filter.
pub trait PartitioningAlgorithm: Send {
    /// Regions this instance produces. Fixed for the instance's lifetime.
    fn outputs(&self) -> &[RegionDescriptor];

    /// Splits `picture` into per-region pictures. Takes ownership of the
    /// input hold; returned pictures are owned by the caller.
    fn filter(&mut self, picture: Picture) -> Result<FramePartition>;

    /// Translates a mouse event from region `index` coordinates into source
    /// coordinates. `None` drops the event.
    fn mouse_map(&mut self, index: usize, event: &MouseEvent) -> Option<MouseEvent> {
        let _ = index;
        Some(*event)
    }

    /// Default display size for a region showing `format`.
    fn default_display_size(&self, format: &VideoFormat, placement: &DisplayPlacement) -> (u32, u32) {
        default_display_size(format, placement)
    }
}
