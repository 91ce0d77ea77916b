mod matrix;
mod tile;

pub use matrix::FillMatrix;
pub use tile::{Position, Tile};

use std::cmp;

use tracing::debug;

use crate::{
    common::{ConvError, ConvResult, ModuleCount},
    raster::Raster,
};

/// Lowest sampling resolution; smaller tiles are upscaled first.
pub const MIN_PIXELS_PER_TILE: u32 = 10;

// Tile sizing
//------------------------------------------------------------------------------

/// Pixels per module: `width / steps` rounded half to even, never below
/// [`MIN_PIXELS_PER_TILE`].
pub fn pixels_per_tile(width: u32, steps: ModuleCount) -> u32 {
    let per_tile = width as f64 / steps.get() as f64;
    cmp::max(per_tile.round_ties_even() as u32, MIN_PIXELS_PER_TILE)
}

/// True unless the raster already is an exact `steps * pixels_per_tile` square.
pub fn needs_rescale(dims: (u32, u32), steps: ModuleCount, pixels_per_tile: u32) -> bool {
    let side = steps.get() * pixels_per_tile;
    dims != (side, side)
}

// Tile grid
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TileGrid {
    steps: ModuleCount,
    pixels_per_tile: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(steps: ModuleCount, pixels_per_tile: u32) -> Self {
        let n = steps.get();
        let mut tiles = Vec::with_capacity((n * n) as usize);
        for y in 0..n {
            for x in 0..n {
                tiles.push(Tile::new(x, y, pixels_per_tile));
            }
        }
        Self { steps, pixels_per_tile, tiles }
    }

    pub fn steps(&self) -> ModuleCount {
        self.steps
    }

    pub fn pixels_per_tile(&self) -> u32 {
        self.pixels_per_tile
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Reads the center pixel of every tile.
    pub fn sample<R: Raster>(&mut self, raster: &R) -> ConvResult<()> {
        for t in self.tiles.iter_mut() {
            let (x, y) = t.center;
            t.sample = Some(raster.pixel(x, y)?);
        }
        Ok(())
    }

    /// Collects the tiles whose luminance is at or below `threshold`. Unsampled tiles count as
    /// blank.
    pub fn classify(&self, threshold: u8) -> FillMatrix {
        let mut matrix = FillMatrix::new(self.steps.get());
        self.tiles
            .iter()
            .filter(|t| t.sample.is_some_and(|s| s.is_filled(threshold)))
            .for_each(|t| matrix.push(t.render_at));
        matrix
    }
}

// ENTRY POINT FOR SAMPLING
/// Samples every module of a `steps` x `steps` symbol filling `raster`, rescaling it first when
/// tile boundaries would not fall on whole pixels.
pub fn build_fill_matrix<R: Raster>(
    raster: &mut R,
    steps: ModuleCount,
    threshold: u8,
) -> ConvResult<FillMatrix> {
    let dims = raster.dimensions();
    if dims.0 == 0 || dims.1 == 0 {
        return Err(ConvError::RasterAccess(format!("empty {}x{} raster", dims.0, dims.1)));
    }

    let ppt = pixels_per_tile(dims.0, steps);
    if needs_rescale(dims, steps, ppt) {
        let side = steps.get() * ppt;
        raster.rescale(side, side)?;
    }
    debug!("Sampling {steps} modules at {ppt}px per tile");

    let mut grid = TileGrid::new(steps, ppt);
    grid.sample(raster)?;
    let matrix = grid.classify(threshold);
    debug!("{} of {} modules filled", matrix.len(), grid.tiles().len());

    Ok(matrix)
}
