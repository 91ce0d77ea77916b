use thiserror::Error;

// Detection failure
//------------------------------------------------------------------------------

/// Reasons the module count could not be inferred from the raster.
#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum DetectionFailure {
    #[error("thresholded image is empty")]
    EmptyImage,
    #[error("no finder marker border within scan bounds")]
    MarkerNotFound,
    #[error("timing row {row} lies outside image height {height}")]
    TimingRowOutOfBounds { row: u32, height: u32 },
    #[error("tile size from timing line ({by_count}px) disagrees with marker ({by_marker}px)")]
    GeometryMismatch { by_count: i64, by_marker: i64 },
}

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConvError {
    #[error("could not determine module count: {0}")]
    Detection(#[from] DetectionFailure),
    #[error("invalid module count {0}: expected 21..=177 in steps of 4")]
    InvalidModuleCount(u32),
    #[error("module count detection disabled and no module count configured")]
    MissingModuleCount,
    #[error("raster access failed: {0}")]
    RasterAccess(String),
    #[error("threshold {0} outside 0..=255")]
    ThresholdOutOfRange(i64),
    #[error("io error: {0}")]
    Io(String),
}

impl From<image::ImageError> for ConvError {
    fn from(e: image::ImageError) -> Self {
        Self::RasterAccess(e.to_string())
    }
}

impl From<std::io::Error> for ConvError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

pub type ConvResult<T> = Result<T, ConvError>;
