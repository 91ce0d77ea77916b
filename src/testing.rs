// Synthetic symbols for unit tests
//------------------------------------------------------------------------------

use image::{GrayImage, Luma};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::sampler::FillMatrix;

/// True for the dark modules of a finder anchored at its top left module.
fn finder_module(r: u32, c: u32) -> bool {
    r == 0 || r == 6 || c == 0 || c == 6 || ((2..=4).contains(&r) && (2..=4).contains(&c))
}

/// Random modules framed by the three finders, their separators and both timing lines.
pub fn qr_like(steps: u32, seed: u64) -> FillMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = steps;
    let corners = [(0, 0), (0, n - 7), (n - 7, 0)];

    FillMatrix::from_fn(steps, |x, y| {
        for (r0, c0) in corners {
            // Finder plus one module of separator around it
            let (r, c) = (y as i64 - r0 as i64, x as i64 - c0 as i64);
            if (-1..=7).contains(&r) && (-1..=7).contains(&c) {
                let inside = (0..7).contains(&r) && (0..7).contains(&c);
                return inside && finder_module(r as u32, c as u32);
            }
        }
        if y == 6 || x == 6 {
            return (x + y) % 2 == 0;
        }
        rng.random_bool(0.5)
    })
}

pub fn symbol_image(matrix: &FillMatrix, module_px: u32, quiet_zone: u32) -> GrayImage {
    matrix.to_image(module_px, quiet_zone)
}

/// Top left finder, `k` timing interruptions and a closing finder on one strip of `k + 14`
/// modules. `k` must be odd so the timing line ends on a light module.
pub fn marker_strip(k: u32, module_px: u32) -> GrayImage {
    debug_assert!(k % 2 == 1, "Timing line needs an odd interruption count: {k}");
    let n = k + 14;
    let m = module_px;
    GrayImage::from_fn(n * m, 7 * m, |x, y| {
        let (c, r) = (x / m, y / m);
        let dark = match c {
            0..=6 => finder_module(r, c),
            _ if c >= k + 7 => finder_module(r, c - (k + 7)),
            _ => r == 6 && c % 2 == 0,
        };
        Luma([if dark { 0 } else { 255 }])
    })
}
