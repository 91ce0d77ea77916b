//! Pixel access capability consumed by the conversion core, plus the [`ImageRaster`] backend
//! built on the `image` crate.

mod backend;

pub use backend::ImageRaster;

use image::imageops::FilterType;
use image::GenericImageView;

use crate::common::{ColorSample, ConvResult};

// Raster access
//------------------------------------------------------------------------------

/// Minimal set of operations the core needs from an image backend.
///
/// Mutating operations take `&mut self` so they always complete before the next read.
pub trait Raster: Sized {
    fn dimensions(&self) -> (u32, u32);

    fn pixel(&self, x: u32, y: u32) -> ConvResult<ColorSample>;

    /// Resizes in place to exactly `w` x `h` pixels.
    fn rescale(&mut self, w: u32, h: u32) -> ConvResult<()>;

    /// Returns a new binary working image: luminance `>= threshold` becomes white, the rest
    /// black. The copy is cropped to the bounding box of its black pixels, so an image without
    /// any foreground yields a 0x0 raster.
    fn threshold_copy(&self, threshold: u8) -> ConvResult<Self>;

    /// Crops near-white margins and returns the new dimensions. Backends without autocrop
    /// support leave the raster untouched.
    fn trim_border(&mut self) -> ConvResult<(u32, u32)> {
        Ok(self.dimensions())
    }

    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }
}

// Backend options
//------------------------------------------------------------------------------

/// Backend context fixed for the lifetime of one raster and its working copies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    /// Resampling filter used by [`Raster::rescale`].
    pub filter: FilterType,
    /// Every RGB channel at or above this value counts as margin for [`Raster::trim_border`].
    pub trim_floor: u8,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self { filter: FilterType::Lanczos3, trim_floor: 200 }
    }
}

impl RasterOptions {
    pub fn filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    pub fn trim_floor(mut self, trim_floor: u8) -> Self {
        self.trim_floor = trim_floor;
        self
    }
}

// Content bounds
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Smallest rectangle containing every pixel accepted by `is_content`, or `None` when no pixel
/// qualifies.
pub fn content_bounds<I, F>(img: &I, is_content: F) -> Option<Bounds>
where
    I: GenericImageView,
    F: Fn(I::Pixel) -> bool,
{
    let (w, h) = img.dimensions();
    let (mut left, mut top, mut right, mut bottom) = (u32::MAX, u32::MAX, 0, 0);
    let mut any = false;

    for y in 0..h {
        for x in 0..w {
            if !is_content(img.get_pixel(x, y)) {
                continue;
            }
            any = true;
            left = left.min(x);
            right = right.max(x);
            top = top.min(y);
            bottom = bottom.max(y);
        }
    }

    any.then(|| Bounds { x: left, y: top, w: right - left + 1, h: bottom - top + 1 })
}
