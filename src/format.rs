// src/format.rs

//! Video format description shared by the compositor, the partitioning
//! algorithms and every display backend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A four character code identifying the pixel layout of a picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chroma(pub [u8; 4]);

impl Chroma {
    pub const I420: Chroma = Chroma(*b"I420");
    pub const NV12: Chroma = Chroma(*b"NV12");
    pub const RGBA: Chroma = Chroma(*b"RGBA");
}

impl fmt::Display for Chroma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{}", byte as char)?;
        }
        Ok(())
    }
}

/// A reduced-or-not rational number, used for sample aspect ratios and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rational {
    pub num: u32,
    pub den: u32,
}

impl Rational {
    pub const ONE: Rational = Rational { num: 1, den: 1 };

    pub fn new(num: u32, den: u32) -> Self {
        Self { num, den }
    }

    /// A rational with a zero term carries no information; treat it as 1:1.
    pub fn or_one(self) -> Self {
        if self.num == 0 || self.den == 0 {
            Self::ONE
        } else {
            self
        }
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::ONE
    }
}

/// How the stored picture must be transformed to appear upright.
///
/// Names describe where the first stored row and column end up, following
/// the EXIF convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    LeftTop,
    LeftBottom,
    RightTop,
    RightBottom,
}

impl Orientation {
    /// Whether displaying this orientation exchanges width and height.
    pub fn is_swapped(self) -> bool {
        matches!(
            self,
            Orientation::LeftTop
                | Orientation::LeftBottom
                | Orientation::RightTop
                | Orientation::RightBottom
        )
    }
}

/// Format of a picture stream: chroma, storage size, visible window,
/// orientation and sample aspect ratio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoFormat {
    pub chroma: Chroma,
    pub width: u32,
    pub height: u32,
    pub x_offset: u32,
    pub y_offset: u32,
    pub visible_width: u32,
    pub visible_height: u32,
    pub orientation: Orientation,
    pub sar: Rational,
}

impl VideoFormat {
    /// A format whose visible area covers the whole picture.
    pub fn new(chroma: Chroma, width: u32, height: u32) -> Self {
        Self {
            chroma,
            width,
            height,
            x_offset: 0,
            y_offset: 0,
            visible_width: width,
            visible_height: height,
            orientation: Orientation::TopLeft,
            sar: Rational::ONE,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_sar(mut self, sar: Rational) -> Self {
        self.sar = sar;
        self
    }

    /// Returns the upright equivalent of this format.
    ///
    /// Transposing orientations swap every horizontal and vertical quantity,
    /// including the sample aspect ratio. The result is always `TopLeft`.
    pub fn apply_rotation(&self) -> VideoFormat {
        let mut out = self.clone();
        if self.orientation.is_swapped() {
            out.width = self.height;
            out.height = self.width;
            out.x_offset = self.y_offset;
            out.y_offset = self.x_offset;
            out.visible_width = self.visible_height;
            out.visible_height = self.visible_width;
            out.sar = Rational::new(self.sar.den, self.sar.num);
        }
        out.orientation = Orientation::TopLeft;
        out
    }
}

impl fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}x{} (visible {}x{}+{}+{}, sar {}:{}, {:?})",
            self.chroma,
            self.width,
            self.height,
            self.visible_width,
            self.visible_height,
            self.x_offset,
            self.y_offset,
            self.sar.num,
            self.sar.den,
            self.orientation
        )
    }
}
