use std::path::Path;

use image::{imageops, DynamicImage, GenericImageView, GrayImage, Luma};
use tracing::debug;

use super::{content_bounds, Raster, RasterOptions};
use crate::common::{ColorSample, ConvError, ConvResult};

// Image backed raster
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ImageRaster {
    img: DynamicImage,
    opts: RasterOptions,
}

impl ImageRaster {
    pub fn new(img: impl Into<DynamicImage>, opts: RasterOptions) -> Self {
        Self { img: img.into(), opts }
    }

    pub fn open(path: impl AsRef<Path>, opts: RasterOptions) -> ConvResult<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|e| ConvError::RasterAccess(format!("{}: {e}", path.display())))?;
        debug!("Opened {} ({}x{}, {:?})", path.display(), img.width(), img.height(), img.color());
        Ok(Self::new(img, opts))
    }

    pub fn options(&self) -> RasterOptions {
        self.opts
    }

    pub fn image(&self) -> &DynamicImage {
        &self.img
    }

    pub fn into_image(self) -> DynamicImage {
        self.img
    }

    // Caller guarantees bounds
    fn sample(&self, x: u32, y: u32) -> ColorSample {
        match &self.img {
            DynamicImage::ImageLuma8(buf) => ColorSample::Gray(buf.get_pixel(x, y)[0]),
            DynamicImage::ImageLumaA8(buf) => ColorSample::Gray(buf.get_pixel(x, y)[0]),
            DynamicImage::ImageLuma16(buf) => {
                ColorSample::Gray((buf.get_pixel(x, y)[0] / 257) as u8)
            }
            DynamicImage::ImageLumaA16(buf) => {
                ColorSample::Gray((buf.get_pixel(x, y)[0] / 257) as u8)
            }
            img => ColorSample::from(img.get_pixel(x, y)),
        }
    }
}

impl Raster for ImageRaster {
    fn dimensions(&self) -> (u32, u32) {
        self.img.dimensions()
    }

    fn pixel(&self, x: u32, y: u32) -> ConvResult<ColorSample> {
        let (w, h) = self.img.dimensions();
        if x >= w || y >= h {
            return Err(ConvError::RasterAccess(format!(
                "pixel ({x}, {y}) outside {w}x{h} raster"
            )));
        }
        Ok(self.sample(x, y))
    }

    fn rescale(&mut self, w: u32, h: u32) -> ConvResult<()> {
        if w == 0 || h == 0 {
            return Err(ConvError::RasterAccess(format!("cannot rescale to {w}x{h}")));
        }
        debug!("Rescaling {}x{} -> {w}x{h} ({:?})", self.img.width(), self.img.height(), self.opts.filter);
        self.img = self.img.resize_exact(w, h, self.opts.filter);
        Ok(())
    }

    fn threshold_copy(&self, threshold: u8) -> ConvResult<Self> {
        let (w, h) = self.img.dimensions();
        let t = threshold as f64;
        let binary = GrayImage::from_fn(w, h, |x, y| {
            if self.sample(x, y).luminance() >= t {
                Luma([255])
            } else {
                Luma([0])
            }
        });

        let cropped = match content_bounds(&binary, |p| p[0] == 0) {
            Some(b) => imageops::crop_imm(&binary, b.x, b.y, b.w, b.h).to_image(),
            None => GrayImage::new(0, 0),
        };
        debug!("Thresholded at {threshold}: {w}x{h} -> {}x{}", cropped.width(), cropped.height());

        Ok(Self::new(cropped, self.opts))
    }

    fn trim_border(&mut self) -> ConvResult<(u32, u32)> {
        let floor = self.opts.trim_floor;
        let rgb = self.img.to_rgb8();
        if let Some(b) = content_bounds(&rgb, |p| p.0.iter().any(|&c| c < floor)) {
            if (b.w, b.h) != self.img.dimensions() {
                debug!("Trimming border to {}x{}+{}+{}", b.w, b.h, b.x, b.y);
                self.img = self.img.crop_imm(b.x, b.y, b.w, b.h);
            }
        }
        Ok(self.img.dimensions())
    }
}
