//! vidsplit - video splitter display compositor.
//!
//! Partitions every frame of one picture stream into regions and routes each
//! region to its own window and display backend.

pub mod compositor;
pub mod config;
pub mod display;
pub mod error;
pub mod format;
pub mod picture;
pub mod splitter;
pub mod window;

pub use compositor::{Compositor, Region};
pub use config::{Config, RegionFailurePolicy, SplitterConfig, CONFIG};
pub use display::{ControlQuery, DisplayDriver, DisplayError, DisplaySize, WindowEvent};
pub use error::{RegionStage, SplitterError};
pub use format::{Chroma, Orientation, Rational, VideoFormat};
pub use picture::{Overlay, OverlayRegion, Picture, Tick};
pub use splitter::{AlgorithmRegistry, PartitioningAlgorithm, RegionDescriptor};
pub use window::{ParentWindow, Window, WindowFactory, WindowOwner};
