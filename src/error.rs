// src/error.rs

//! Errors reported when a compositor cannot be opened.

use std::fmt;

/// Which step of region construction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionStage {
    Window,
    Enable,
    Display,
}

impl fmt::Display for RegionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegionStage::Window => "window",
            RegionStage::Enable => "window enable",
            RegionStage::Display => "display",
        };
        f.write_str(name)
    }
}

/// Open-time failures. None of these leave a compositor behind.
#[derive(Debug, thiserror::Error)]
pub enum SplitterError {
    #[error("no video splitter module named {0:?}")]
    ModuleNotFound(String),

    #[error("video splitter {name:?} failed to initialize: {source}")]
    AlgorithmCreateFailed {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("region {index}: {stage} creation failed: {source}")]
    RegionCreateFailed {
        index: usize,
        stage: RegionStage,
        #[source]
        source: anyhow::Error,
    },

    #[error("cannot allocate {0}")]
    AllocationFailed(&'static str),
}

impl SplitterError {
    pub(crate) fn region(index: usize, stage: RegionStage, source: anyhow::Error) -> Self {
        SplitterError::RegionCreateFailed {
            index,
            stage,
            source,
        }
    }
}
