use crate::common::ColorSample;

// Position
//------------------------------------------------------------------------------

/// Module coordinates in the symbol grid. Orders row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// Tile
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    /// Where the module is drawn in the vector output.
    pub render_at: Position,
    /// Raster pixel probed for the module color.
    pub center: (u32, u32),
    pub sample: Option<ColorSample>,
}

impl Tile {
    pub fn new(x: u32, y: u32, pixels_per_tile: u32) -> Self {
        let half = pixels_per_tile / 2;
        let center = (x * pixels_per_tile + half, y * pixels_per_tile + half);
        Self { render_at: Position::new(x, y), center, sample: None }
    }
}
