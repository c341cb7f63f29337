// src/compositor/region.rs
//! Region - one window and display pair rendering one tile of the source.

use crate::display::driver::DisplayDriver;
use crate::window::Window;
use log::{debug, trace};
use parking_lot::{Mutex, MutexGuard};
use std::ops::{Deref, DerefMut};
#[cfg(test)]
use std::thread::{self, ThreadId};

/// Handles and size guarded by a region's lock.
pub(crate) struct RegionState {
    pub(crate) window: Option<Box<dyn Window>>,
    pub(crate) display: Option<Box<dyn DisplayDriver>>,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

/// One output tile of a compositor.
///
/// The lock serializes the pipeline thread against the window's event
/// thread. It only ever covers a handle access or a single backend call.
pub struct Region {
    index: usize,
    state: Mutex<RegionState>,
    #[cfg(test)]
    holder: Mutex<Option<ThreadId>>,
}

/// Exclusive access to a region's handles. Releases the lock on drop.
pub(crate) struct RegionGuard<'a> {
    state: MutexGuard<'a, RegionState>,
    #[cfg(test)]
    holder: &'a Mutex<Option<ThreadId>>,
}

impl Deref for RegionGuard<'_> {
    type Target = RegionState;

    fn deref(&self) -> &RegionState {
        &self.state
    }
}

impl DerefMut for RegionGuard<'_> {
    fn deref_mut(&mut self) -> &mut RegionState {
        &mut self.state
    }
}

#[cfg(test)]
impl Drop for RegionGuard<'_> {
    fn drop(&mut self) {
        *self.holder.lock() = None;
    }
}

impl Region {
    pub(crate) fn new(index: usize, width: u32, height: u32) -> Self {
        Self {
            index,
            state: Mutex::new(RegionState {
                window: None,
                display: None,
                width,
                height,
            }),
            #[cfg(test)]
            holder: Mutex::new(None),
        }
    }

    pub(crate) fn lock(&self) -> RegionGuard<'_> {
        let state = self.state.lock();
        #[cfg(test)]
        {
            *self.holder.lock() = Some(thread::current().id());
        }
        RegionGuard {
            state,
            #[cfg(test)]
            holder: &self.holder,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether some thread currently holds this region's lock.
    pub fn is_locked(&self) -> bool {
        self.state.is_locked()
    }

    /// Whether the calling thread holds this region's lock.
    #[cfg(test)]
    pub(crate) fn is_held_by_current_thread(&self) -> bool {
        *self.holder.lock() == Some(thread::current().id())
    }

    /// Current size of the region's surface.
    pub fn size(&self) -> (u32, u32) {
        let state = self.lock();
        (state.width, state.height)
    }

    pub fn has_display(&self) -> bool {
        self.lock().display.is_some()
    }

    pub fn has_window(&self) -> bool {
        self.lock().window.is_some()
    }

    /// Records a new surface size and forwards it to the display, if any.
    ///
    /// `ack` runs under the lock once the display has seen the new size.
    /// Returns whether a display received the resize.
    pub(crate) fn resize<F>(&self, width: u32, height: u32, ack: F) -> bool
    where
        F: FnOnce(u32, u32),
    {
        let mut state = self.lock();
        state.width = width;
        state.height = height;
        let forwarded = match state.display.as_mut() {
            Some(display) => {
                display.set_size(width, height);
                true
            }
            None => false,
        };
        ack(width, height);
        trace!(
            "Region {}: size {}x{} (display: {})",
            self.index,
            width,
            height,
            forwarded
        );
        forwarded
    }

    /// Destroys the display under the lock, then disables and deletes the
    /// window. Safe to call on a region that was never populated.
    ///
    /// The window is torn down outside the lock: deleting it may wait for its
    /// event thread, which may itself be waiting on this lock.
    pub(crate) fn teardown(&self) {
        let window = {
            let mut state = self.lock();
            if let Some(mut display) = state.display.take() {
                display.close();
                drop(display);
                debug!("Region {}: display destroyed", self.index);
            }
            state.window.take()
        };
        if let Some(mut window) = window {
            window.disable();
            drop(window);
            debug!("Region {}: window destroyed", self.index);
        }
    }
}

impl std::fmt::Debug for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Region")
            .field("index", &self.index)
            .field("locked", &self.is_locked())
            .finish()
    }
}
