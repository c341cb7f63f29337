// src/splitter/clone.rs
//! Shows the whole source on every region.

use crate::config::SplitterConfig;
use crate::format::VideoFormat;
use crate::picture::Picture;
use crate::splitter::{FramePartition, PartitioningAlgorithm, RegionDescriptor};
use anyhow::{ensure, Result};
use serde::Deserialize;

pub const NAME: &str = "clone";

const MAX_CLONES: usize = 99;

#[derive(Debug, Deserialize)]
#[serde(default)]
struct CloneOptions {
    /// Number of copies; ignored when `modules` is given.
    count: usize,
    /// Display backend for each copy.
    modules: Vec<String>,
}

impl Default for CloneOptions {
    fn default() -> Self {
        Self {
            count: 2,
            modules: Vec::new(),
        }
    }
}

pub struct CloneSplitter {
    outputs: Vec<RegionDescriptor>,
}

impl CloneSplitter {
    pub fn new(source: &VideoFormat, cfg: &SplitterConfig) -> Result<Self> {
        let options: CloneOptions = cfg.options_as()?;
        let count = if options.modules.is_empty() {
            options.count
        } else {
            options.modules.len()
        };
        ensure!(
            count <= MAX_CLONES,
            "clone count {} exceeds {}",
            count,
            MAX_CLONES
        );
        let modules = if options.modules.is_empty() {
            vec![String::new(); count]
        } else {
            options.modules
        };

        let outputs = modules
            .into_iter()
            .map(|module| RegionDescriptor::new(module, source.clone()))
            .collect();
        Ok(Self { outputs })
    }
}

impl PartitioningAlgorithm for CloneSplitter {
    fn outputs(&self) -> &[RegionDescriptor] {
        &self.outputs
    }

    fn filter(&mut self, picture: Picture) -> Result<FramePartition> {
        let partition = self
            .outputs
            .iter()
            .map(|output| Some(picture.view(output.format.clone(), (0, 0))))
            .collect();
        Ok(partition)
    }
}
