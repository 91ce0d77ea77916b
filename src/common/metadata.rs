use std::fmt::{Display, Formatter};
use std::ops::Deref;

use super::error::{ConvError, ConvResult};

pub const MIN_STEPS: u32 = 21;
pub const MAX_STEPS: u32 = 177;
pub const DEFAULT_THRESHOLD: u8 = 127;

// Module count
//------------------------------------------------------------------------------

/// Number of modules along one side of a QR symbol ("steps").
///
/// Always one of the 40 legal sizes: `21 + 4 * (version - 1)`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct ModuleCount(u32);

impl ModuleCount {
    pub fn new(steps: u32) -> ConvResult<Self> {
        if !(MIN_STEPS..=MAX_STEPS).contains(&steps) || (steps - MIN_STEPS) % 4 != 0 {
            return Err(ConvError::InvalidModuleCount(steps));
        }
        Ok(Self(steps))
    }

    pub fn from_version(version: u32) -> ConvResult<Self> {
        Self::new(version.saturating_mul(4).saturating_add(17))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn version(self) -> u32 {
        (self.0 - 17) / 4
    }

    /// All legal module counts, smallest first.
    pub fn all() -> impl Iterator<Item = Self> {
        (MIN_STEPS..=MAX_STEPS).step_by(4).map(Self)
    }
}

impl Deref for ModuleCount {
    type Target = u32;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<u32> for ModuleCount {
    type Error = ConvError;
    fn try_from(steps: u32) -> ConvResult<Self> {
        Self::new(steps)
    }
}

impl Display for ModuleCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} (version {})", self.0, self.0, self.version())
    }
}

/// Validates a configured threshold into the `0..=255` luminance range.
pub fn threshold_from(value: i64) -> ConvResult<u8> {
    u8::try_from(value).map_err(|_| ConvError::ThresholdOutOfRange(value))
}
