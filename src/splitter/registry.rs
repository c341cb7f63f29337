// src/splitter/registry.rs
//! Name to constructor mapping for partitioning algorithms.

use crate::config::SplitterConfig;
use crate::format::VideoFormat;
use crate::splitter::{clone, wall, PartitioningAlgorithm};
use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt;

/// Capability every registered algorithm provides.
pub const SPLITTER_CAPABILITY: &str = "video splitter";

/// Builds an algorithm instance for a source format and configuration.
pub type AlgorithmConstructor = Box<
    dyn Fn(&VideoFormat, &SplitterConfig) -> Result<Box<dyn PartitioningAlgorithm>> + Send + Sync,
>;

#[derive(Default)]
pub struct AlgorithmRegistry {
    entries: BTreeMap<String, AlgorithmConstructor>,
}

impl AlgorithmRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the builtin algorithms.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(clone::NAME, |fmt, cfg| {
            Ok(Box::new(clone::CloneSplitter::new(fmt, cfg)?) as Box<dyn PartitioningAlgorithm>)
        });
        registry.register(wall::NAME, |fmt, cfg| {
            Ok(Box::new(wall::WallSplitter::new(fmt, cfg)?) as Box<dyn PartitioningAlgorithm>)
        });
        registry
    }

    /// Registers `constructor` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(&VideoFormat, &SplitterConfig) -> Result<Box<dyn PartitioningAlgorithm>>
            + Send
            + Sync
            + 'static,
    {
        self.entries.insert(name.to_string(), Box::new(constructor));
    }

    pub fn resolve(&self, name: &str) -> Option<&AlgorithmConstructor> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.keys()).finish()
    }
}
