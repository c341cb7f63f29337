// src/config.rs

//! Configuration structures for the splitter.
//!
//! Everything deserializes from JSON with defaults for missing fields, so a
//! config file only needs to name what it changes. The process-wide
//! [`CONFIG`] is read once from the file named by `VIDSPLIT_CONFIG`.

use crate::display::placement::DisplayPlacement;
use crate::window::WindowConfig;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Environment variable naming the JSON config file.
pub const CONFIG_ENV_VAR: &str = "VIDSPLIT_CONFIG";

/// Global configuration, loaded on first use.
///
/// A missing variable yields defaults; an unreadable or invalid file is
/// logged and also yields defaults.
pub static CONFIG: Lazy<Config> = Lazy::new(|| match std::env::var_os(CONFIG_ENV_VAR) {
    Some(path) => Config::load(Path::new(&path)).unwrap_or_else(|e| {
        log::error!("Config: {:#}; using defaults", e);
        Config::default()
    }),
    None => Config::default(),
});

// --- Top-Level Configuration Structure ---

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Compositor and partitioning settings.
    pub splitter: SplitterConfig,
    /// Synthetic source used by the demo binary.
    pub demo: DemoConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

// --- Splitter Configuration ---

/// What to do when one region's window or display cannot be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionFailurePolicy {
    /// Roll back everything and fail the open.
    #[default]
    Abort,
    /// Leave the failed region without output and carry on.
    Tolerate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    /// Partitioning algorithm to use. Unset or empty selects `default_algorithm`.
    pub algorithm: Option<String>,
    pub default_algorithm: String,
    pub region_failure: RegionFailurePolicy,
    /// Requested overall display size and zoom.
    pub placement: DisplayPlacement,
    /// Decoration flags applied to every region window. Position and size
    /// are computed per region.
    pub window: WindowConfig,
    /// Algorithm specific keys, opaque to the compositor.
    pub options: Map<String, Value>,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        SplitterConfig {
            algorithm: None,
            default_algorithm: "wall".to_string(),
            region_failure: RegionFailurePolicy::Abort,
            placement: DisplayPlacement::default(),
            window: WindowConfig::default(),
            options: Map::new(),
        }
    }
}

impl SplitterConfig {
    /// Convenience constructor selecting `name`.
    pub fn with_algorithm(name: impl Into<String>) -> Self {
        SplitterConfig {
            algorithm: Some(name.into()),
            ..Default::default()
        }
    }

    /// Name of the algorithm to load.
    pub fn algorithm_name(&self) -> &str {
        match self.algorithm.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.default_algorithm,
        }
    }

    pub fn set_option(&mut self, key: &str, value: Value) {
        self.options.insert(key.to_string(), value);
    }

    /// Deserializes the algorithm specific keys into `T`.
    pub fn options_as<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.options.clone()))
            .context("Invalid video splitter options")
    }
}

// --- Demo Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub width: u32,
    pub height: u32,
    /// Number of frames pushed through the compositor.
    pub frames: u32,
    /// Distance between presentation timestamps in microseconds.
    pub frame_interval_us: i64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            width: 1920,
            height: 1080,
            frames: 120,
            frame_interval_us: 40_000,
        }
    }
}
