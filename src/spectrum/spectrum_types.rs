use std::fmt::Display;
use std::str::FromStr;

use mzpeaks::CentroidLike;
use thiserror::Error;

use super::ion::Ion;

/// The spectroscopic technique a spectrum was acquired with.
///
/// The numeric code of each variant is written into the first block of every
/// SPLASH, so existing codes must never be reassigned.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SpectrumType {
    /// The acquisition technique was not recorded
    Unknown = 0,
    #[default]
    MS = 1,
    NMR = 2,
    UV = 3,
    IR = 4,
    Raman = 5,
}

impl SpectrumType {
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::MS => "ms",
            Self::NMR => "nmr",
            Self::UV => "uv",
            Self::IR => "ir",
            Self::Raman => "raman",
        }
    }
}

impl Display for SpectrumType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpectrumTypeError {
    #[error("{0} is not a known spectrum type code")]
    UnknownCode(u8),
    #[error("{0:?} is not a known spectrum type")]
    UnknownName(String),
}

impl TryFrom<u8> for SpectrumType {
    type Error = SpectrumTypeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::MS),
            2 => Ok(Self::NMR),
            3 => Ok(Self::UV),
            4 => Ok(Self::IR),
            5 => Ok(Self::Raman),
            _ => Err(SpectrumTypeError::UnknownCode(value)),
        }
    }
}

/// Accepts either the numeric code or the case-insensitive name
impl FromStr for SpectrumType {
    type Err = SpectrumTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return Self::try_from(code);
        }
        match s.to_ascii_lowercase().as_str() {
            "unknown" => Ok(Self::Unknown),
            "ms" => Ok(Self::MS),
            "nmr" => Ok(Self::NMR),
            "uv" => Ok(Self::UV),
            "ir" => Ok(Self::IR),
            "raman" => Ok(Self::Raman),
            _ => Err(SpectrumTypeError::UnknownName(s.to_string())),
        }
    }
}

/// A typed, unordered collection of peaks to be hashed.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spectrum {
    spectrum_type: SpectrumType,
    ions: Vec<Ion>,
}

impl Spectrum {
    pub fn new(spectrum_type: SpectrumType, ions: Vec<Ion>) -> Self {
        Self {
            spectrum_type,
            ions,
        }
    }

    /// Build a spectrum from any collection of [`mzpeaks`] centroids
    pub fn from_peaks<'a, C: CentroidLike + 'a, I: IntoIterator<Item = &'a C>>(
        spectrum_type: SpectrumType,
        peaks: I,
    ) -> Self {
        Self::new(
            spectrum_type,
            peaks.into_iter().map(Ion::from_centroid).collect(),
        )
    }

    pub fn spectrum_type(&self) -> SpectrumType {
        self.spectrum_type
    }

    pub fn ions(&self) -> &[Ion] {
        &self.ions
    }

    pub fn len(&self) -> usize {
        self.ions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ions.is_empty()
    }

    /// The largest intensity of any ion, or `None` for an empty spectrum
    pub fn base_peak_intensity(&self) -> Option<f64> {
        self.ions
            .iter()
            .map(|i| i.intensity())
            .max_by(|a, b| a.total_cmp(b))
    }

    /// Create a copy of this spectrum with intensities rescaled so that the
    /// most intense ion has intensity `scale`.
    ///
    /// If the base peak intensity is not positive, the spectrum is returned as-is.
    pub fn to_relative(&self, scale: f64) -> Self {
        match self.base_peak_intensity() {
            Some(max_intensity) if max_intensity > 0.0 => {
                let ions = self
                    .ions
                    .iter()
                    .map(|i| Ion::new(i.mz(), i.intensity() / max_intensity * scale))
                    .collect();
                Self::new(self.spectrum_type, ions)
            }
            _ => self.clone(),
        }
    }
}

impl FromIterator<Ion> for Spectrum {
    fn from_iter<T: IntoIterator<Item = Ion>>(iter: T) -> Self {
        Self::new(SpectrumType::default(), iter.into_iter().collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_type_codes() {
        assert_eq!(SpectrumType::Unknown.code(), 0);
        assert_eq!(SpectrumType::MS.code(), 1);
        assert_eq!(SpectrumType::Raman.code(), 5);
        for code in 0..=5u8 {
            assert_eq!(SpectrumType::try_from(code).unwrap().code(), code);
        }
        assert_eq!(
            SpectrumType::try_from(6),
            Err(SpectrumTypeError::UnknownCode(6))
        );
    }

    #[test]
    fn test_type_from_str() {
        assert_eq!("MS".parse::<SpectrumType>().unwrap(), SpectrumType::MS);
        assert_eq!("nmr".parse::<SpectrumType>().unwrap(), SpectrumType::NMR);
        assert_eq!("3".parse::<SpectrumType>().unwrap(), SpectrumType::UV);
        assert!("ms2".parse::<SpectrumType>().is_err());
        assert_eq!(SpectrumType::Raman.to_string(), "raman");
    }

    #[test]
    fn test_to_relative() {
        let spec = Spectrum::new(
            SpectrumType::MS,
            vec![Ion::new(100.0, 50.0), Ion::new(101.0, 200.0)],
        );
        assert_eq!(spec.base_peak_intensity(), Some(200.0));
        let rel = spec.to_relative(1000.0);
        assert_eq!(rel.ions()[0].intensity(), 250.0);
        assert_eq!(rel.ions()[1].intensity(), 1000.0);
        assert_eq!(rel.ions()[0].mz(), 100.0);

        let flat = Spectrum::new(SpectrumType::MS, vec![Ion::new(100.0, 0.0)]);
        assert_eq!(flat.to_relative(1000.0), flat);
        assert_eq!(Spectrum::default().base_peak_intensity(), None);
    }

    #[test]
    fn test_from_peaks() {
        let peaks = vec![
            mzpeaks::CentroidPeak::new(100.0, 10.0, 0),
            mzpeaks::CentroidPeak::new(200.0, 20.0, 1),
        ];
        let spec = Spectrum::from_peaks(SpectrumType::MS, peaks.iter());
        assert_eq!(spec.len(), 2);
        assert_eq!(spec.ions()[1], Ion::new(200.0, 20.0));
    }
}
