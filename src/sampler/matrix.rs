use image::{GrayImage, Luma};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};

use super::tile::Position;

// Fill matrix
//------------------------------------------------------------------------------

/// Dark modules of a symbol, in the row-major order they were sampled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillMatrix {
    steps: u32,
    cells: Vec<Position>,
}

impl FillMatrix {
    pub fn new(steps: u32) -> Self {
        Self { steps, cells: Vec::new() }
    }

    /// Builds a matrix by asking `f(x, y)` for every module, row by row.
    pub fn from_fn<F>(steps: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> bool,
    {
        let mut res = Self::new(steps);
        for y in 0..steps {
            for x in 0..steps {
                if f(x, y) {
                    res.push(Position::new(x, y));
                }
            }
        }
        res
    }

    pub fn push(&mut self, pos: Position) {
        debug_assert!(
            pos.x < self.steps && pos.y < self.steps,
            "Module {pos:?} outside {0}x{0} grid",
            self.steps
        );
        self.cells.push(pos);
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.cells.iter()
    }

    pub fn is_filled(&self, x: u32, y: u32) -> bool {
        self.cells.contains(&Position::new(x, y))
    }

    /// Row-major boolean grid of `steps * steps` entries.
    pub fn to_grid(&self) -> Vec<bool> {
        let n = self.steps as usize;
        let mut grid = vec![false; n * n];
        for p in &self.cells {
            grid[p.y as usize * n + p.x as usize] = true;
        }
        grid
    }

    /// Rasterises the matrix: dark modules of `module_px` pixels on white, surrounded by
    /// `quiet_zone` blank modules.
    pub fn to_image(&self, module_px: u32, quiet_zone: u32) -> GrayImage {
        let qz = quiet_zone * module_px;
        let sz = self.steps * module_px + 2 * qz;
        let mut canvas = GrayImage::from_pixel(sz, sz, Luma([255]));
        if module_px == 0 {
            return canvas;
        }

        for p in &self.cells {
            let x = (qz + p.x * module_px) as i32;
            let y = (qz + p.y * module_px) as i32;
            let rect = Rect::at(x, y).of_size(module_px, module_px);
            draw_filled_rect_mut(&mut canvas, rect, Luma([0]));
        }
        canvas
    }
}

impl<'a> IntoIterator for &'a FillMatrix {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

#[cfg(test)]
mod matrix_tests {
    use image::Luma;

    use super::FillMatrix;
    use crate::sampler::Position;

    #[test]
    fn test_from_fn_is_row_major() {
        let m = FillMatrix::from_fn(21, |x, y| x == y || x == 20 - y);
        let cells = m.iter().copied().collect::<Vec<_>>();
        let mut sorted = cells.clone();
        sorted.sort();
        assert_eq!(cells, sorted);
        assert_eq!(m.len(), 41);
        assert_eq!(cells[0], Position::new(0, 0));
        assert_eq!(cells[1], Position::new(20, 0));
    }

    #[test]
    fn test_to_grid() {
        let m = FillMatrix::from_fn(21, |x, y| (x + y) % 3 == 0);
        let grid = m.to_grid();
        assert_eq!(grid.len(), 441);
        for y in 0..21 {
            for x in 0..21 {
                assert_eq!(grid[(y * 21 + x) as usize], m.is_filled(x, y));
            }
        }
    }

    #[test]
    fn test_to_image() {
        let mut m = FillMatrix::new(21);
        m.push(Position::new(0, 0));
        m.push(Position::new(20, 20));
        let img = m.to_image(3, 2);
        assert_eq!(img.dimensions(), (75, 75));
        assert_eq!(*img.get_pixel(5, 5), Luma([255]));
        assert_eq!(*img.get_pixel(6, 6), Luma([0]));
        assert_eq!(*img.get_pixel(8, 8), Luma([0]));
        assert_eq!(*img.get_pixel(9, 9), Luma([255]));
        assert_eq!(*img.get_pixel(68, 68), Luma([0]));
        assert_eq!(*img.get_pixel(69, 69), Luma([255]));
    }

    #[test]
    fn test_empty() {
        let m = FillMatrix::new(25);
        assert!(m.is_empty());
        assert_eq!(m.steps(), 25);
        assert!(m.to_image(2, 0).pixels().all(|p| *p == Luma([255])));
    }
}
