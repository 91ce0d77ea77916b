//! # qrsvg
//!
//! Turns a raster image of a QR symbol into a crisp vector drawing. The module count is inferred
//! from the pixels (or configured), every module is sampled at its center, and the dark ones are
//! emitted as unit squares of an SVG document.
//!
//! ## Pipeline
//!
//! - **Module count detection**: the right edge of the top left finder pattern gives the module
//!   size, and the interruptions along the timing line give the number of modules
//! - **Tile sampling**: the raster is rescaled to whole pixels per module when needed, and each
//!   module center is compared against a luminance threshold
//! - **Vector output**: one `1x1` rect per dark module on a `steps x steps` canvas, in row-major
//!   order so identical input always yields identical bytes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qrsvg::{Converter, ImageRaster, RasterOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let raster = ImageRaster::open("qr_code.png", RasterOptions::default())?;
//!
//! // Detect the module count, falling back to 25 modules when detection fails
//! let conversion = Converter::builder().steps(25).threshold(127).build()?.convert(raster)?;
//!
//! std::fs::write("qr_code.svg", conversion.to_svg())?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Individual stages
//!
//! ```rust
//! use image::{GrayImage, Luma};
//! use qrsvg::{build_fill_matrix, render_vector, ImageRaster, ModuleCount, RasterOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // 21 modules of 20px, only the top left module dark
//! let img = GrayImage::from_fn(420, 420, |x, y| Luma([if x < 20 && y < 20 { 0 } else { 255 }]));
//! let mut raster = ImageRaster::new(img, RasterOptions::default());
//!
//! let steps = ModuleCount::new(21)?;
//! let matrix = build_fill_matrix(&mut raster, steps, 127)?;
//! assert_eq!(matrix.len(), 1);
//!
//! let svg = render_vector(steps, &matrix);
//! assert!(svg.contains(r#"<rect x="0" y="0" width="1" height="1"/>"#));
//! # Ok(())
//! # }
//! ```

#![allow(clippy::items_after_test_module)]

pub(crate) mod common;
pub mod converter;
pub mod logger;
pub mod raster;
pub mod reader;
pub mod render;
pub mod sampler;

#[cfg(test)]
mod testing;

pub use common::color::ColorSample;
pub use common::error::{ConvError, ConvResult, DetectionFailure};
pub use common::metadata::{ModuleCount, DEFAULT_THRESHOLD, MAX_STEPS, MIN_STEPS};
pub use converter::{Conversion, Converter, ConverterBuilder};
pub use raster::{ImageRaster, Raster, RasterOptions};
pub use reader::{detect, resolve_module_count, Detection};
pub use render::{render_vector, VectorDocument};
pub use sampler::{build_fill_matrix, FillMatrix, Position};
