// src/display/drivers/mock.rs

use crate::display::driver::DisplayDriver;
use crate::display::messages::{ControlQuery, DisplayError};
use crate::picture::{Overlay, Picture, Tick};
use crate::window::WindowOwner;
use parking_lot::Mutex;
use std::sync::Arc;

/// Every collaborator call observed by the mocks, in order. `locked` records
/// whether the calling thread held the owning region's lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    NewWindow { index: usize, width: u32, height: u32 },
    Enable(usize),
    Disable(usize),
    WindowDropped(usize),
    NewDisplay { index: usize, module: String },
    Prepare { index: usize, date: Tick, locked: bool },
    Display { index: usize, locked: bool },
    SetSize { index: usize, width: u32, height: u32, locked: bool },
    Control { index: usize, code: i32, locked: bool },
    Close { index: usize, locked: bool },
}

#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Call>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: Call) {
        self.0.lock().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().clone()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

pub struct MockDisplay {
    index: usize,
    owner: WindowOwner,
    journal: Journal,
}

impl MockDisplay {
    pub fn new(owner: &WindowOwner, journal: Journal) -> Self {
        Self {
            index: owner.index(),
            owner: owner.clone(),
            journal,
        }
    }

    fn locked(&self) -> bool {
        self.owner.region_held_here()
    }
}

impl DisplayDriver for MockDisplay {
    fn prepare(&mut self, _picture: &Picture, _overlay: Option<&Overlay>, date: Tick) {
        self.journal.record(Call::Prepare {
            index: self.index,
            date,
            locked: self.locked(),
        });
    }

    fn display(&mut self, _picture: &Picture) {
        self.journal.record(Call::Display {
            index: self.index,
            locked: self.locked(),
        });
    }

    fn control(&mut self, query: ControlQuery) -> Result<(), DisplayError> {
        self.journal.record(Call::Control {
            index: self.index,
            code: query.code(),
            locked: self.locked(),
        });
        Ok(())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.journal.record(Call::SetSize {
            index: self.index,
            width,
            height,
            locked: self.locked(),
        });
    }

    fn close(&mut self) {
        self.journal.record(Call::Close {
            index: self.index,
            locked: self.locked(),
        });
    }
}
