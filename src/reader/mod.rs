//! Infers the number of modules of a QR symbol from its pixels: the right edge of the top left
//! finder gives the module size, and the transitions along the timing line give the count.

mod border;
mod timing;

pub use border::{BorderScan, BorderScanner};
pub use timing::{count_transitions, timing_row};

use std::ops::Range;

use tracing::debug;

use crate::{
    common::{ConvResult, DetectionFailure, MAX_STEPS, MIN_STEPS},
    raster::Raster,
};

/// Modules covered by the two finders spanning the timing line.
const FINDER_MODULES: i64 = 14;

// Detection
//------------------------------------------------------------------------------

/// Module count inferred from a raster, with the evidence it was derived from.
#[derive(Debug, Clone)]
pub struct Detection<R> {
    /// Count clamped to `21..=177`. Not necessarily a legal QR size.
    pub steps: u32,
    /// Row in which the marker border was found.
    pub marker_row: u32,
    /// First white column right of the top left finder.
    pub boundary: u32,
    /// Row along which the timing line was counted.
    pub timing_row: u32,
    pub interruptions: i64,
    /// Thresholded and trimmed working copy the scans ran on.
    pub raster: R,
}

// ENTRY POINT FOR MODULE COUNT DETECTION
pub fn detect<R: Raster>(raster: &R, threshold: u8) -> ConvResult<Detection<R>> {
    let binary = raster.threshold_copy(threshold)?;
    let (w, h) = binary.dimensions();
    if w == 0 || h == 0 {
        return Err(DetectionFailure::EmptyImage.into());
    }

    // Seek the marker border row by row
    let scanner = BorderScanner::for_width(w);
    let scan_len = scanner.scan_len(w);
    let mut hit = None;
    for y in 0..h {
        let row = luma_row(&binary, y, 0..scan_len)?;
        let scan = scanner.scan(&row);
        if scan.found {
            hit = Some((y, scan.boundary));
            break;
        }
    }

    let (marker_row, boundary) = match hit {
        Some((_, 0)) | None => return Err(DetectionFailure::MarkerNotFound.into()),
        Some(hit) => hit,
    };
    debug!("Marker border at column {boundary} on row {marker_row}");

    // Count interruptions along the timing line
    let j = timing_row(marker_row, boundary);
    if j >= h {
        return Err(DetectionFailure::TimingRowOutOfBounds { row: j, height: h }.into());
    }
    let row = luma_row(&binary, j, boundary..w)?;
    let interruptions = count_transitions(&row);
    let candidate = interruptions + FINDER_MODULES;
    debug!("Timing row {j}: {interruptions} interruptions, candidate {candidate} modules");

    // Both estimates of the module size must agree
    let by_marker = (boundary as f64 / 7.0).round() as i64;
    let by_count = if candidate > 0 { (w as f64 / candidate as f64).round() as i64 } else { -1 };
    if by_count != by_marker {
        return Err(DetectionFailure::GeometryMismatch { by_count, by_marker }.into());
    }

    let steps = candidate.clamp(MIN_STEPS as i64, MAX_STEPS as i64) as u32;
    debug!("Detected {steps} modules ({by_marker}px per module)");

    Ok(Detection { steps, marker_row, boundary, timing_row: j, interruptions, raster: binary })
}

/// Module count of the symbol in `raster`, clamped to `21..=177`.
pub fn resolve_module_count<R: Raster>(raster: &R, threshold: u8) -> ConvResult<u32> {
    detect(raster, threshold).map(|d| d.steps)
}

fn luma_row<R: Raster>(raster: &R, y: u32, xs: Range<u32>) -> ConvResult<Vec<u8>> {
    xs.map(|x| raster.pixel(x, y).map(|c| c.luma_u8())).collect()
}

#[cfg(test)]
mod reader_tests {
    use image::{imageops::FilterType, GrayImage, Luma, Rgb, RgbImage};
    use test_case::test_case;

    use super::{detect, resolve_module_count};
    use crate::{
        raster::{ImageRaster, Raster, RasterOptions},
        testing::{marker_strip, qr_like, symbol_image},
        ConvError, DetectionFailure,
    };

    fn raster(img: GrayImage) -> ImageRaster {
        ImageRaster::new(img, RasterOptions::default().filter(FilterType::Nearest))
    }

    #[test_case(21, 20, 0)]
    #[test_case(21, 10, 4)]
    #[test_case(25, 12, 2)]
    #[test_case(33, 8, 0)]
    #[test_case(57, 6, 4)]
    #[test_case(101, 4, 4)]
    fn test_detect_symbol(steps: u32, module_px: u32, quiet_zone: u32) {
        let img = symbol_image(&qr_like(steps, steps as u64), module_px, quiet_zone);
        let d = detect(&raster(img), 127).unwrap();
        assert_eq!(d.steps, steps);
        assert_eq!(d.marker_row, 0);
        assert_eq!(d.boundary, 7 * module_px);
        assert_eq!(d.interruptions, steps as i64 - 14);
        assert_eq!(d.raster.dimensions(), (steps * module_px, steps * module_px));
    }

    #[test]
    fn test_timing_row_sits_in_finder_row_six() {
        let img = symbol_image(&qr_like(21, 7), 20, 0);
        let d = detect(&raster(img), 127).unwrap();
        assert_eq!(d.timing_row, 130);
    }

    #[test_case(3, 4, 21; "clamped_up")]
    #[test_case(7, 6, 21; "smallest")]
    #[test_case(11, 5, 25; "in_range")]
    #[test_case(163, 3, 177; "largest")]
    #[test_case(167, 2, 177; "clamped_down")]
    fn test_known_interruptions(k: u32, module_px: u32, exp: u32) {
        let d = detect(&raster(marker_strip(k, module_px)), 127).unwrap();
        assert_eq!(d.interruptions, k as i64);
        assert_eq!(d.steps, exp);
    }

    #[test]
    fn test_resolve_from_rgb() {
        let gray = symbol_image(&qr_like(29, 3), 10, 4);
        let rgb = RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
            let v = gray.get_pixel(x, y)[0];
            if v == 0 {
                Rgb([40, 10, 70])
            } else {
                Rgb([240, 250, 230])
            }
        });
        let r = ImageRaster::new(rgb, RasterOptions::default());
        assert_eq!(resolve_module_count(&r, 127), Ok(29));
    }

    #[test]
    fn test_blank_image_is_empty() {
        let r = raster(GrayImage::from_pixel(300, 300, Luma([255])));
        assert_eq!(
            resolve_module_count(&r, 127),
            Err(ConvError::Detection(DetectionFailure::EmptyImage))
        );
    }

    #[test]
    fn test_all_dark_image_has_no_marker() {
        let r = raster(GrayImage::from_pixel(300, 300, Luma([3])));
        assert_eq!(
            resolve_module_count(&r, 127),
            Err(ConvError::Detection(DetectionFailure::MarkerNotFound))
        );
    }

    #[test]
    fn test_geometry_mismatch() {
        // A dark band right of the symbol widens the image without adding timing modules
        let strip = marker_strip(7, 8);
        let (w, h) = strip.dimensions();
        let mut img = GrayImage::from_pixel(w + 40, h, Luma([0]));
        image::imageops::replace(&mut img, &strip, 0, 0);

        let err = resolve_module_count(&raster(img), 127).unwrap_err();
        assert_eq!(
            err,
            ConvError::Detection(DetectionFailure::GeometryMismatch { by_count: 10, by_marker: 8 })
        );
    }
}
