// src/window/mock.rs

use crate::display::driver::DisplayDriver;
use crate::display::drivers::mock::{Call, Journal, MockDisplay};
use crate::window::{DisplayRequest, Window, WindowConfig, WindowFactory, WindowOwner};
use anyhow::{anyhow, Result};
use parking_lot::Mutex;

pub struct MockWindow {
    index: usize,
    journal: Journal,
}

impl Window for MockWindow {
    fn enable(&mut self, _cfg: &WindowConfig) -> Result<()> {
        self.journal.record(Call::Enable(self.index));
        Ok(())
    }

    fn disable(&mut self) {
        self.journal.record(Call::Disable(self.index));
    }
}

impl Drop for MockWindow {
    fn drop(&mut self) {
        self.journal.record(Call::WindowDropped(self.index));
    }
}

/// Factory producing mock windows and displays, with per-region failure
/// injection.
#[derive(Default)]
pub struct MockFactory {
    pub journal: Journal,
    pub fail_window: Option<usize>,
    pub fail_display: Option<usize>,
    /// Resizes window `.0` to `.1` x `.2` while its display is being created.
    pub resize_during_display: Option<(usize, u32, u32)>,
    pub(crate) owners: Mutex<Vec<WindowOwner>>,
}

impl MockFactory {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            ..Default::default()
        }
    }

    pub fn owners(&self) -> Vec<WindowOwner> {
        self.owners.lock().clone()
    }
}

impl WindowFactory for MockFactory {
    fn new_window(&self, cfg: &WindowConfig, owner: WindowOwner) -> Result<Box<dyn Window>> {
        let index = owner.index();
        if self.fail_window == Some(index) {
            return Err(anyhow!("no window for region {}", index));
        }
        self.journal.record(Call::NewWindow {
            index,
            width: cfg.width,
            height: cfg.height,
        });
        self.owners.lock().push(owner);
        Ok(Box::new(MockWindow {
            index,
            journal: self.journal.clone(),
        }))
    }

    fn new_display(&self, request: DisplayRequest<'_>) -> Result<Box<dyn DisplayDriver>> {
        if self.fail_display == Some(request.index) {
            return Err(anyhow!("no display for region {}", request.index));
        }
        if let Some((index, width, height)) = self.resize_during_display {
            if index == request.index {
                request.owner.resized(width, height);
            }
        }
        self.journal.record(Call::NewDisplay {
            index: request.index,
            module: request.module.to_string(),
        });
        Ok(Box::new(MockDisplay::new(request.owner, self.journal.clone())))
    }
}
