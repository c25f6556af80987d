use std::fmt;

use mzpeaks::{CentroidLike, CoordinateLike, IntensityMeasurement, MZ};

/// A single (m/z, intensity) measurement of a spectrum.
///
/// Both values are kept at full double precision. They are only reduced to
/// six decimal places when a spectrum is encoded for hashing.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ion {
    mz: f64,
    intensity: f64,
}

impl Ion {
    pub const fn new(mz: f64, intensity: f64) -> Self {
        Self { mz, intensity }
    }

    /// Build an [`Ion`] from any centroided peak type from [`mzpeaks`]
    pub fn from_centroid<C: CentroidLike>(peak: &C) -> Self {
        Self::new(
            CoordinateLike::<MZ>::coordinate(peak),
            IntensityMeasurement::intensity(peak) as f64,
        )
    }

    #[inline]
    pub fn mz(&self) -> f64 {
        self.mz
    }

    #[inline]
    pub fn intensity(&self) -> f64 {
        self.intensity
    }
}

impl fmt::Display for Ion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.mz, self.intensity)
    }
}

impl From<(f64, f64)> for Ion {
    fn from((mz, intensity): (f64, f64)) -> Self {
        Self::new(mz, intensity)
    }
}

impl From<mzpeaks::CentroidPeak> for Ion {
    fn from(peak: mzpeaks::CentroidPeak) -> Self {
        Self::from_centroid(&peak)
    }
}
