use image::{Luma, Rgb, Rgba};

// Color sample
//------------------------------------------------------------------------------

/// Raw color read from a single pixel, in the color model of the backing raster.
///
/// CMYK channels are percentages in `0.0..=100.0`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ColorSample {
    Gray(u8),
    Rgb([u8; 3]),
    Cmyk([f64; 4]),
}

impl ColorSample {
    /// Collapses the sample into a single luminance-like scalar in `0.0..=255.0`.
    ///
    /// Every model is reduced to the arithmetic mean of its RGB channels. CMYK is first
    /// converted with `channel = 255 * (1 - C/100) * (1 - K/100)`.
    pub fn luminance(&self) -> f64 {
        match *self {
            Self::Gray(v) => v as f64,
            Self::Rgb([r, g, b]) => (r as f64 + g as f64 + b as f64) / 3.0,
            Self::Cmyk(cmyk) => {
                let [r, g, b] = cmyk_to_rgb(cmyk);
                (r + g + b) / 3.0
            }
        }
    }

    /// Luminance rounded to the nearest integer, as used by the row scanners.
    pub fn luma_u8(&self) -> u8 {
        self.luminance().round().clamp(0.0, 255.0) as u8
    }

    /// True when the sample counts as foreground for the given threshold.
    pub fn is_filled(&self, threshold: u8) -> bool {
        self.luminance() <= threshold as f64
    }
}

fn cmyk_to_rgb([c, m, y, k]: [f64; 4]) -> [f64; 3] {
    let key = 1.0 - k.clamp(0.0, 100.0) / 100.0;
    let chan = |v: f64| 255.0 * (1.0 - v.clamp(0.0, 100.0) / 100.0) * key;
    [chan(c), chan(m), chan(y)]
}

impl From<Luma<u8>> for ColorSample {
    fn from(p: Luma<u8>) -> Self {
        Self::Gray(p[0])
    }
}

impl From<Rgb<u8>> for ColorSample {
    fn from(p: Rgb<u8>) -> Self {
        Self::Rgb(p.0)
    }
}

// Alpha is dropped
impl From<Rgba<u8>> for ColorSample {
    fn from(p: Rgba<u8>) -> Self {
        Self::Rgb([p[0], p[1], p[2]])
    }
}
