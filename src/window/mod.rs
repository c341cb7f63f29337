// src/window/mod.rs
//! Native windows and the factory that creates windows and their displays.
//!
//! A window runs its own event loop, usually on its own thread. It reports
//! input through the `WindowOwner` handed to it at creation; the owner either
//! handles the event inline under the region lock (resize) or queues it as a
//! message for the compositor (mouse, keyboard, close).

pub mod headless;
#[cfg(test)]
pub mod mock;
pub mod owner;

use crate::display::driver::DisplayDriver;
use crate::format::VideoFormat;
use anyhow::Result;
use serde::{Deserialize, Serialize};

pub use headless::{HeadlessFactory, HeadlessWindow};
pub use owner::{ParentWindow, RegionEvent, WindowOwner};

/// Placement and decoration requested for a new window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub decorated: bool,
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            decorated: true,
            fullscreen: false,
        }
    }
}

/// A native window. Dropping it deletes it.
pub trait Window: Send {
    /// Shows the window and starts delivering events to its owner.
    fn enable(&mut self, cfg: &WindowConfig) -> Result<()>;

    /// Hides the window and stops event delivery.
    fn disable(&mut self);
}

/// Everything a factory needs to open a display inside a region window.
pub struct DisplayRequest<'a> {
    pub index: usize,
    /// Backend name; empty selects the factory's default backend.
    pub module: &'a str,
    pub format: &'a VideoFormat,
    pub window: &'a WindowConfig,
    pub owner: &'a WindowOwner,
}

/// Creates native windows and the displays bound to them.
pub trait WindowFactory {
    fn new_window(&self, cfg: &WindowConfig, owner: WindowOwner) -> Result<Box<dyn Window>>;

    fn new_display(&self, request: DisplayRequest<'_>) -> Result<Box<dyn DisplayDriver>>;
}
