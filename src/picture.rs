// src/picture.rs

//! Reference-counted picture handles.
//!
//! A `Picture` is a cheap handle: cloning it takes an extra hold on the same
//! picture and dropping it releases that hold. Pixel storage is shared
//! separately, so a partitioning algorithm can produce new per-region
//! handles that view the input pixels without keeping the input handle
//! alive.

use crate::format::VideoFormat;
use std::sync::Arc;

/// Presentation timestamp in microseconds.
pub type Tick = i64;

#[derive(Debug)]
struct PictureInner {
    format: VideoFormat,
    date: Tick,
    pixels: Arc<[u8]>,
    /// Origin of this picture inside `pixels`, in source pixels.
    origin: (u32, u32),
}

/// A held reference to a decoded picture.
#[derive(Debug, Clone)]
pub struct Picture(Arc<PictureInner>);

impl Picture {
    /// Allocates a zeroed picture large enough for 4 bytes per pixel.
    pub fn new(format: VideoFormat, date: Tick) -> Self {
        let len = format.width as usize * format.height as usize * 4;
        Self::from_pixels(format, date, vec![0u8; len].into())
    }

    pub fn from_pixels(format: VideoFormat, date: Tick, pixels: Arc<[u8]>) -> Self {
        Picture(Arc::new(PictureInner {
            format,
            date,
            pixels,
            origin: (0, 0),
        }))
    }

    /// Creates a new, independently held picture over the same pixels.
    ///
    /// `origin` is the top-left corner of the view in this picture's
    /// coordinates; `format` describes the view.
    pub fn view(&self, format: VideoFormat, origin: (u32, u32)) -> Picture {
        Picture(Arc::new(PictureInner {
            format,
            date: self.0.date,
            pixels: Arc::clone(&self.0.pixels),
            origin: (self.0.origin.0 + origin.0, self.0.origin.1 + origin.1),
        }))
    }

    pub fn format(&self) -> &VideoFormat {
        &self.0.format
    }

    pub fn date(&self) -> Tick {
        self.0.date
    }

    pub fn origin(&self) -> (u32, u32) {
        self.0.origin
    }

    pub fn pixels(&self) -> &[u8] {
        &self.0.pixels
    }

    /// Number of live holds on this picture handle.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Whether both handles refer to the same held picture.
    pub fn same_as(&self, other: &Picture) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Whether both pictures share pixel storage.
    pub fn shares_pixels_with(&self, other: &Picture) -> bool {
        Arc::ptr_eq(&self.0.pixels, &other.0.pixels)
    }
}

/// One blended element of an overlay.
#[derive(Debug, Clone)]
pub struct OverlayRegion {
    pub x: i32,
    pub y: i32,
    pub alpha: u8,
    pub picture: Picture,
}

/// Subtitles and OSD to blend on top of a picture. Passed through to every
/// region display unchanged.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    pub regions: Vec<OverlayRegion>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Chroma;
    use test_log::test;

    #[test]
    fn clone_and_drop_track_holds() {
        let pic = Picture::new(VideoFormat::new(Chroma::RGBA, 4, 4), 10);
        assert_eq!(pic.ref_count(), 1);
        let held = pic.clone();
        assert_eq!(pic.ref_count(), 2);
        assert!(held.same_as(&pic));
        drop(held);
        assert_eq!(pic.ref_count(), 1);
    }

    #[test]
    fn views_share_pixels_but_not_holds() {
        let pic = Picture::new(VideoFormat::new(Chroma::RGBA, 8, 8), 42);
        let view = pic.view(VideoFormat::new(Chroma::RGBA, 4, 4), (4, 0));
        let nested = view.view(VideoFormat::new(Chroma::RGBA, 2, 2), (1, 2));

        assert_eq!(pic.ref_count(), 1);
        assert_eq!(view.ref_count(), 1);
        assert!(view.shares_pixels_with(&pic));
        assert!(!view.same_as(&pic));
        assert_eq!(nested.origin(), (5, 2));
        assert_eq!(nested.date(), 42);
        assert_eq!(pic.pixels().len(), 8 * 8 * 4);
        assert!(std::ptr::eq(nested.pixels(), pic.pixels()));
    }
}
