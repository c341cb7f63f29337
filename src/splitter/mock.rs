// src/splitter/mock.rs

use crate::config::SplitterConfig;
use crate::display::messages::MouseEvent;
use crate::format::{Chroma, VideoFormat};
use crate::picture::Picture;
use crate::splitter::{AlgorithmRegistry, FramePartition, PartitioningAlgorithm, RegionDescriptor};
use anyhow::{anyhow, Result};
use parking_lot::Mutex;
use std::sync::Arc;

pub const MOCK_NAME: &str = "default_splitter";

/// Observable state shared between a test and the mock splitter.
#[derive(Debug, Default)]
pub struct MockSplitterState {
    pub created: usize,
    pub dropped: usize,
    pub filter_calls: usize,
    /// Limit on pictures returned per filter call; `None` returns one per
    /// output.
    pub outputs_per_filter: Option<usize>,
    pub fail_filter: bool,
    pub fail_create: bool,
    /// Copies of every picture handed out by the last filter call.
    pub produced: Vec<Picture>,
}

pub type SharedState = Arc<Mutex<MockSplitterState>>;

pub struct MockSplitter {
    outputs: Vec<RegionDescriptor>,
    state: SharedState,
}

impl PartitioningAlgorithm for MockSplitter {
    fn outputs(&self) -> &[RegionDescriptor] {
        &self.outputs
    }

    fn filter(&mut self, picture: Picture) -> Result<FramePartition> {
        let mut state = self.state.lock();
        state.filter_calls += 1;
        if state.fail_filter {
            return Err(anyhow!("out of pictures"));
        }
        let count = state
            .outputs_per_filter
            .unwrap_or(self.outputs.len())
            .min(self.outputs.len());
        let pictures: Vec<Picture> = self.outputs[..count]
            .iter()
            .map(|o| picture.view(o.format.clone(), (0, 0)))
            .collect();
        state.produced = pictures.clone();
        Ok(pictures.into_iter().map(Some).collect())
    }

    fn mouse_map(&mut self, index: usize, event: &MouseEvent) -> Option<MouseEvent> {
        match *event {
            MouseEvent::Moved { x, .. } if x < 0 => None,
            MouseEvent::Moved { x, y } => Some(MouseEvent::Moved {
                x: x + 1000 * index as i32,
                y,
            }),
            other => Some(other),
        }
    }
}

impl Drop for MockSplitter {
    fn drop(&mut self) {
        self.state.lock().dropped += 1;
    }
}

/// The two outputs used throughout the compositor tests.
pub fn two_outputs() -> Vec<RegionDescriptor> {
    vec![
        RegionDescriptor::new(
            "splitter_module_1",
            VideoFormat::new(Chroma::I420, 1920, 1080),
        ),
        RegionDescriptor::new(
            "splitter_module_2",
            VideoFormat::new(Chroma::I420, 1280, 720),
        ),
    ]
}

/// A registry holding only the mock splitter, declaring `outputs`.
pub fn mock_registry(outputs: Vec<RegionDescriptor>) -> (AlgorithmRegistry, SharedState) {
    let state = SharedState::default();
    let shared = Arc::clone(&state);
    let mut registry = AlgorithmRegistry::new();
    registry.register(MOCK_NAME, move |_fmt: &VideoFormat, _cfg: &SplitterConfig| {
        let mut s = shared.lock();
        if s.fail_create {
            return Err(anyhow!("splitter refused the format"));
        }
        s.created += 1;
        Ok(Box::new(MockSplitter {
            outputs: outputs.clone(),
            state: Arc::clone(&shared),
        }) as Box<dyn PartitioningAlgorithm>)
    });
    (registry, state)
}
