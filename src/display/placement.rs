// src/display/placement.rs
//! Requested placement of a display and the default size derived from it.

use crate::format::{Rational, VideoFormat};
use serde::{Deserialize, Serialize};

/// Requested overall display size and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayPlacement {
    /// Requested width in pixels; 0 lets the source decide.
    pub width: u32,
    /// Requested height in pixels; 0 lets the source decide.
    pub height: u32,
    pub zoom: Rational,
}

impl Default for DisplayPlacement {
    fn default() -> Self {
        DisplayPlacement {
            width: 0,
            height: 0,
            zoom: Rational::ONE,
        }
    }
}

/// Computes the size a display showing `source` should initially have.
///
/// An explicitly requested size wins. Otherwise the visible source area is
/// stretched along one axis by the sample aspect ratio (never shrunk) and
/// scaled by the zoom factor. Transposed sources get the dimensions swapped.
pub fn default_display_size(source: &VideoFormat, placement: &DisplayPlacement) -> (u32, u32) {
    if placement.width != 0 && placement.height != 0 {
        return (placement.width, placement.height);
    }

    let sar = source.sar.or_one();
    let zoom = placement.zoom.or_one();
    // Three u32 factors can exceed u64.
    let visible_w = u128::from(source.visible_width);
    let visible_h = u128::from(source.visible_height);
    let (zn, zd) = (u128::from(zoom.num), u128::from(zoom.den));
    let (sn, sd) = (u128::from(sar.num), u128::from(sar.den));

    let (width, height) = if sn >= sd {
        (visible_w * sn * zn / sd / zd, visible_h * zn / zd)
    } else {
        (visible_w * zn / zd, visible_h * sd * zn / sn / zd)
    };

    let width = u32::try_from(width).unwrap_or(u32::MAX);
    let height = u32::try_from(height).unwrap_or(u32::MAX);

    if source.orientation.is_swapped() {
        (height, width)
    } else {
        (width, height)
    }
}
