// Timing line
//------------------------------------------------------------------------------

// Finder  sep  timing line              sep  Finder
// *******  _   * _ * _ * _ * _ * _ * _  _   *******
//          ^ scan starts at the marker boundary

/// Row that runs through the middle of the last module row of the top left finder, which is
/// also the row of the horizontal timing line.
pub fn timing_row(marker_row: u32, boundary: u32) -> u32 {
    let f = boundary as f64;
    let offset = (f - f / 14.0).ceil() as i64;
    (marker_row as i64 - offset).unsigned_abs() as u32
}

/// Counts color changes along a row of luminance values starting at the marker boundary.
///
/// Leading dark pixels (`< 127`) are skipped, so remnants of the marker edge are not counted.
/// A trailing pure white pixel means an untrimmed quiet zone was crossed; its transition is
/// taken back.
pub fn count_transitions(row: &[u8]) -> i64 {
    let mut last: Option<u8> = None;
    let mut flips = 0i64;

    for &v in row {
        match last {
            None if v < 127 => continue,
            Some(prev) if prev != v => flips += 1,
            _ => {}
        }
        last = Some(v);
    }

    if last == Some(255) {
        flips -= 1;
    }
    flips
}
