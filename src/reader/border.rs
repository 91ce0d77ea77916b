use crate::common::MAX_STEPS;

// Marker border
//------------------------------------------------------------------------------

// ********   **  <- row through the top edge of the top left finder
// ^      ^
// start  boundary (first white after the marker)

/// Outcome of scanning one row for the right edge of the top left finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderScan {
    pub found: bool,
    /// Column where the scan stopped. When `found`, the first white column past the marker.
    pub boundary: u32,
}

/// Scan bounds derived from the width of the thresholded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderScanner {
    /// Smallest possible module size, i.e. the size at 177 modules.
    pub minimal_tile: u32,
    /// Largest possible marker width. Version 1 has 21 modules per side; dividing by 20 leaves
    /// some slack for antialiasing.
    pub max_marker_len: u32,
}

impl BorderScanner {
    pub fn for_width(width: u32) -> Self {
        let minimal_tile = width / MAX_STEPS;
        let max_marker_len = width.div_ceil(20) * 7 + 1;
        Self { minimal_tile, max_marker_len }
    }

    /// Number of leading columns of a row the scan may look at.
    pub fn scan_len(&self, width: u32) -> u32 {
        width.min(self.max_marker_len + 1)
    }

    /// Scans a row of luminance values left to right.
    ///
    /// Black (`0`) and white (`> 127`) pixels are counted from the first black pixel on. Once
    /// past `minimal_tile * 7`, the first white pixel decides: the border is found if the white
    /// run so far does not exceed the black run, otherwise the row is rejected.
    pub fn scan(&self, row: &[u8]) -> BorderScan {
        let min_marker = self.minimal_tile as usize * 7;
        let len = row.len().min(self.max_marker_len as usize + 1);

        let mut started = false;
        let (mut black, mut white) = (0usize, 0usize);

        for (x, &v) in row[..len].iter().enumerate() {
            if v == 0 {
                started = true;
                black += 1;
            } else if v > 127 && started {
                white += 1;
                if x >= min_marker {
                    return BorderScan { found: white <= black, boundary: x as u32 };
                }
            }
        }

        BorderScan { found: false, boundary: len.saturating_sub(1) as u32 }
    }
}
