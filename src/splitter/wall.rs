// src/splitter/wall.rs
//! Tiles the source into a `cols` x `rows` grid, one region per tile.

use crate::config::SplitterConfig;
use crate::display::messages::MouseEvent;
use crate::format::VideoFormat;
use crate::picture::Picture;
use crate::splitter::{FramePartition, PartitioningAlgorithm, RegionDescriptor};
use anyhow::{ensure, Result};
use serde::Deserialize;

pub const NAME: &str = "wall";

const MAX_SIDE: u32 = 16;

#[derive(Debug, Deserialize)]
#[serde(default)]
struct WallOptions {
    cols: u32,
    rows: u32,
    /// Tile indices (row-major) that get a display. Unset means all.
    active: Option<Vec<usize>>,
    /// Display backend for every active tile.
    module: String,
}

impl Default for WallOptions {
    fn default() -> Self {
        Self {
            cols: 3,
            rows: 3,
            active: None,
            module: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tile {
    x: u32,
    y: u32,
}

pub struct WallSplitter {
    outputs: Vec<RegionDescriptor>,
    tiles: Vec<Tile>,
}

/// Splits `total` into `parts` spans; the last span absorbs the remainder.
fn spans(total: u32, parts: u32) -> Vec<(u32, u32)> {
    let base = total / parts;
    (0..parts)
        .map(|i| {
            let start = i * base;
            let len = if i + 1 == parts { total - start } else { base };
            (start, len)
        })
        .collect()
}

impl WallSplitter {
    pub fn new(source: &VideoFormat, cfg: &SplitterConfig) -> Result<Self> {
        let options: WallOptions = cfg.options_as()?;
        ensure!(
            (1..=MAX_SIDE).contains(&options.cols) && (1..=MAX_SIDE).contains(&options.rows),
            "wall of {}x{} tiles is out of range 1..={}",
            options.cols,
            options.rows,
            MAX_SIDE
        );
        ensure!(
            source.visible_width >= options.cols && source.visible_height >= options.rows,
            "source {}x{} too small for a {}x{} wall",
            source.visible_width,
            source.visible_height,
            options.cols,
            options.rows
        );

        let count = (options.cols * options.rows) as usize;
        if let Some(active) = &options.active {
            if let Some(bad) = active.iter().find(|&&i| i >= count) {
                anyhow::bail!("active tile {} outside a wall of {} tiles", bad, count);
            }
        }

        let columns = spans(source.visible_width, options.cols);
        let rows = spans(source.visible_height, options.rows);
        let mut outputs = Vec::with_capacity(count);
        let mut tiles = Vec::with_capacity(count);

        for (row, &(y, height)) in rows.iter().enumerate() {
            for (col, &(x, width)) in columns.iter().enumerate() {
                let index = row * columns.len() + col;
                let format = VideoFormat::new(source.chroma, width, height).with_sar(source.sar);
                let active = options
                    .active
                    .as_ref()
                    .map_or(true, |list| list.contains(&index));
                outputs.push(if active {
                    RegionDescriptor::new(options.module.clone(), format)
                } else {
                    RegionDescriptor::inactive(format)
                });
                tiles.push(Tile {
                    x: source.x_offset + x,
                    y: source.y_offset + y,
                });
            }
        }

        Ok(Self { outputs, tiles })
    }
}

impl PartitioningAlgorithm for WallSplitter {
    fn outputs(&self) -> &[RegionDescriptor] {
        &self.outputs
    }

    fn filter(&mut self, picture: Picture) -> Result<FramePartition> {
        let partition = self
            .outputs
            .iter()
            .zip(&self.tiles)
            .map(|(output, tile)| {
                output
                    .active
                    .then(|| picture.view(output.format.clone(), (tile.x, tile.y)))
            })
            .collect();
        Ok(partition)
    }

    fn mouse_map(&mut self, index: usize, event: &MouseEvent) -> Option<MouseEvent> {
        let output = self.outputs.get(index)?;
        if !output.active {
            return None;
        }
        let tile = self.tiles[index];
        Some(match *event {
            MouseEvent::Moved { x, y } => MouseEvent::Moved {
                x: x.saturating_add(tile.x as i32),
                y: y.saturating_add(tile.y as i32),
            },
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::messages::MouseButton;
    use crate::format::Chroma;
    use serde_json::json;
    use test_log::test;

    fn config(cols: u32, rows: u32) -> SplitterConfig {
        let mut cfg = SplitterConfig::with_algorithm(NAME);
        cfg.set_option("cols", json!(cols));
        cfg.set_option("rows", json!(rows));
        cfg
    }

    #[test]
    fn last_tile_absorbs_remainder() {
        let fmt = VideoFormat::new(Chroma::I420, 1000, 500);
        let wall = WallSplitter::new(&fmt, &config(3, 2)).unwrap();
        let sizes: Vec<(u32, u32)> = wall
            .outputs()
            .iter()
            .map(|o| (o.format.width, o.format.height))
            .collect();
        assert_eq!(
            sizes,
            vec![(333, 250), (333, 250), (334, 250), (333, 250), (333, 250), (334, 250)]
        );
    }

    #[test]
    fn inactive_tiles_get_no_picture() {
        let fmt = VideoFormat::new(Chroma::I420, 400, 200);
        let mut cfg = config(2, 1);
        cfg.set_option("active", json!([1]));
        let mut wall = WallSplitter::new(&fmt, &cfg).unwrap();

        assert!(!wall.outputs()[0].active);
        assert!(wall.outputs()[1].active);

        let partition = wall.filter(Picture::new(fmt.clone(), 0)).unwrap();
        assert!(partition[0].is_none());
        let right = partition[1].as_ref().unwrap();
        assert_eq!(right.origin(), (200, 0));
        assert_eq!(right.format().width, 200);
    }

    #[test]
    fn mouse_is_translated_by_tile_origin() {
        let fmt = VideoFormat::new(Chroma::I420, 400, 200);
        let mut wall = WallSplitter::new(&fmt, &config(2, 2)).unwrap();

        let moved = wall.mouse_map(3, &MouseEvent::Moved { x: 5, y: 6 });
        assert_eq!(moved, Some(MouseEvent::Moved { x: 205, y: 106 }));

        let press = MouseEvent::Pressed(MouseButton::Left);
        assert_eq!(wall.mouse_map(0, &press), Some(press));
        assert_eq!(wall.mouse_map(9, &press), None);
    }

    #[test]
    fn rejects_bad_geometry() {
        let fmt = VideoFormat::new(Chroma::I420, 400, 200);
        assert!(WallSplitter::new(&fmt, &config(0, 2)).is_err());
        assert!(WallSplitter::new(&fmt, &config(17, 1)).is_err());

        let mut cfg = config(2, 2);
        cfg.set_option("active", json!([4]));
        assert!(WallSplitter::new(&fmt, &cfg).is_err());
    }
}
