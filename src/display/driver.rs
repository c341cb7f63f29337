// src/display/driver.rs
//! DisplayDriver trait - the uniform contract every display implements.
//!
//! Leaf backends (headless, GL, KMS, ...) and the splitting `Compositor`
//! implement the same trait, which is what lets a compositor drive other
//! displays, including other compositors.
//!
//! ## Lifecycle
//! 1. Construction - performed by a `WindowFactory` (leaf backends) or
//!    `Compositor::open`; this is the contract's `open`.
//! 2. `prepare(pic)` then `display(pic)`, once per frame, in that order.
//! 3. `control(query)` between frames when the configuration changes.
//! 4. `close()` - explicit teardown; `Drop` must release anything `close`
//!    did not.
//!
//! ## Threading Model
//! Frame calls come from a single pipeline thread. `set_size` may also be
//! invoked from a window's event thread, always under the owning region's
//! lock, so implementations must be `Send` but never see concurrent calls.

use crate::display::messages::{ControlQuery, DisplayError, DisplaySize};
use crate::picture::{Overlay, Picture, Tick};

pub trait DisplayDriver: Send {
    /// Gets `picture` ready to be shown at `date`, blending `overlay` if any.
    ///
    /// Prepare must not show anything yet; the matching `display` does.
    fn prepare(&mut self, picture: &Picture, overlay: Option<&Overlay>, date: Tick);

    /// Shows the picture passed to the preceding `prepare`.
    fn display(&mut self, picture: &Picture);

    /// Applies a configuration change.
    ///
    /// Queries that do not apply return `DisplayError::Unsupported`.
    fn control(&mut self, query: ControlQuery) -> Result<(), DisplayError>;

    /// Tells the display that its surface is now `width` x `height`.
    fn set_size(&mut self, width: u32, height: u32) {
        let query = ControlQuery::DisplaySize(DisplaySize { width, height });
        if let Err(e) = self.control(query) {
            log::debug!("DisplayDriver: resize to {}x{} not applied: {}", width, height, e);
        }
    }

    /// Explicit teardown. Must tolerate being called more than once.
    fn close(&mut self) {}
}
