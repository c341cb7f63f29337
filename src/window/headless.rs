// src/window/headless.rs
//! Headless windows and a factory producing headless displays.

use crate::display::driver::DisplayDriver;
use crate::display::drivers::headless::{HeadlessDisplayDriver, HeadlessStats};
use crate::window::{DisplayRequest, Window, WindowConfig, WindowFactory, WindowOwner};
use anyhow::{bail, Result};
use log::{debug, info};
use parking_lot::Mutex;
use std::sync::Arc;

/// Backend names served by `HeadlessFactory`.
pub const HEADLESS_MODULES: &[&str] = &["", "headless", "dummy"];

/// A window with no native surface. Input can be injected through its owner.
pub struct HeadlessWindow {
    owner: WindowOwner,
    cfg: WindowConfig,
    enabled: bool,
}

impl HeadlessWindow {
    pub fn new(cfg: &WindowConfig, owner: WindowOwner) -> Self {
        Self {
            owner,
            cfg: *cfg,
            enabled: false,
        }
    }

    pub fn owner(&self) -> &WindowOwner {
        &self.owner
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Window for HeadlessWindow {
    fn enable(&mut self, cfg: &WindowConfig) -> Result<()> {
        self.cfg = *cfg;
        self.enabled = true;
        debug!(
            "HeadlessWindow {}: enabled {}x{}+{}+{}",
            self.owner.index(),
            cfg.width,
            cfg.height,
            cfg.x,
            cfg.y
        );
        Ok(())
    }

    fn disable(&mut self) {
        self.enabled = false;
        debug!("HeadlessWindow {}: disabled", self.owner.index());
    }
}

/// Creates headless windows and displays, remembering the owner endpoint
/// and frame counters of everything it made.
#[derive(Default)]
pub struct HeadlessFactory {
    owners: Mutex<Vec<WindowOwner>>,
    stats: Mutex<Vec<(usize, Arc<HeadlessStats>)>>,
}

impl HeadlessFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Event endpoints of every window created so far, in creation order.
    pub fn owners(&self) -> Vec<WindowOwner> {
        self.owners.lock().clone()
    }

    /// Frame counters of every display created so far, keyed by region.
    pub fn stats(&self) -> Vec<(usize, Arc<HeadlessStats>)> {
        self.stats.lock().clone()
    }
}

impl WindowFactory for HeadlessFactory {
    fn new_window(&self, cfg: &WindowConfig, owner: WindowOwner) -> Result<Box<dyn Window>> {
        self.owners.lock().push(owner.clone());
        Ok(Box::new(HeadlessWindow::new(cfg, owner)))
    }

    fn new_display(&self, request: DisplayRequest<'_>) -> Result<Box<dyn DisplayDriver>> {
        if !HEADLESS_MODULES.contains(&request.module) {
            bail!("no display module named {:?}", request.module);
        }
        let name = format!("{}#{}", request.module, request.index);
        let driver = HeadlessDisplayDriver::new(
            name,
            request.format,
            request.window.width,
            request.window.height,
        );
        self.stats.lock().push((request.index, driver.stats()));
        info!(
            "HeadlessFactory: display for region {} ready",
            request.index
        );
        Ok(Box::new(driver))
    }
}
