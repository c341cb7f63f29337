// src/window/owner.rs
//! Event endpoints between region windows and the compositor.

use crate::compositor::region::Region;
use crate::display::messages::{DisplaySize, MouseEvent, WindowEvent};
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::trace;
use std::sync::{Arc, Weak};

/// An input event reported by the window of region `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionEvent {
    pub index: usize,
    pub event: WindowEvent,
}

/// The endpoint a region window reports to. Cheap to clone and `Send`, so a
/// window can move it onto its event thread.
#[derive(Debug, Clone)]
pub struct WindowOwner {
    index: usize,
    region: Weak<Region>,
    events: Sender<RegionEvent>,
}

impl WindowOwner {
    pub(crate) fn new(region: &Arc<Region>, events: Sender<RegionEvent>) -> Self {
        Self {
            index: region.index(),
            region: Arc::downgrade(region),
            events,
        }
    }

    /// Index of the region this window belongs to.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Reports a new window size. Handled inline: the region display is
    /// resized under the region lock before this returns.
    pub fn resized(&self, width: u32, height: u32) {
        self.resized_with_ack(width, height, |_, _| {});
    }

    /// Like `resized`, then runs `ack` while still holding the region lock.
    pub fn resized_with_ack<F>(&self, width: u32, height: u32, ack: F)
    where
        F: FnOnce(u32, u32),
    {
        match self.region.upgrade() {
            Some(region) => {
                region.resize(width, height, ack);
            }
            None => trace!("WindowOwner {}: resize after close ignored", self.index),
        }
    }

    pub fn mouse_event(&self, event: MouseEvent) {
        self.send(WindowEvent::Mouse(event));
    }

    pub fn key_pressed(&self, key: u32) {
        self.send(WindowEvent::Key(key));
    }

    pub fn close_requested(&self) {
        self.send(WindowEvent::CloseRequested);
    }

    /// Reports any window event, dispatching to the matching handler.
    pub fn report(&self, event: WindowEvent) {
        match event {
            WindowEvent::Resized(DisplaySize { width, height }) => self.resized(width, height),
            other => self.send(other),
        }
    }

    /// Whether the region lock is currently held. Lets backends check the
    /// locking contract from inside their callbacks.
    pub fn is_region_locked(&self) -> bool {
        self.region.upgrade().is_some_and(|r| r.is_locked())
    }

    /// Whether the calling thread holds the region lock.
    #[cfg(test)]
    pub(crate) fn region_held_here(&self) -> bool {
        self.region
            .upgrade()
            .is_some_and(|r| r.is_held_by_current_thread())
    }

    fn send(&self, event: WindowEvent) {
        let message = RegionEvent {
            index: self.index,
            event,
        };
        if let Err(e) = self.events.send(message) {
            trace!(
                "WindowOwner {}: compositor gone, dropping {:?}",
                self.index,
                e.into_inner().event
            );
        }
    }
}

/// The window the compositor stands in for. Receives the mapped input of
/// every region window.
#[derive(Debug, Clone)]
pub struct ParentWindow {
    events: Sender<WindowEvent>,
}

impl ParentWindow {
    pub fn new() -> (Self, Receiver<WindowEvent>) {
        let (events, rx) = unbounded();
        (Self { events }, rx)
    }

    pub fn from_sender(events: Sender<WindowEvent>) -> Self {
        Self { events }
    }

    pub(crate) fn report(&self, event: WindowEvent) {
        if let Err(e) = self.events.send(event) {
            trace!("ParentWindow: receiver gone, dropping {:?}", e.into_inner());
        }
    }
}
