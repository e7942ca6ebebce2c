//! Strongly typed dweller identifier.

use std::fmt;

/// Index of a dweller within one simulation run.
///
/// Dwellers are numbered in row-major order of their starting cells, so the
/// same layout always yields the same ids.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DwellerId(pub u32);

impl DwellerId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DwellerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DwellerId({})", self.0)
    }
}

impl From<DwellerId> for usize {
    #[inline(always)]
    fn from(id: DwellerId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for DwellerId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<DwellerId, Self::Error> {
        u32::try_from(n).map(DwellerId)
    }
}
