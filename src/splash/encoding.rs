//! Canonical text encodings of a [`Spectrum`].
//!
//! Every encoding works from one of two total orders over the ions:
//!
//! - *intensity order*: intensity descending, ties broken by m/z ascending
//! - *m/z order*: m/z ascending, ties broken by intensity descending
//!
//! Both orders compare the raw `f64` values with [`f64::total_cmp`], so the
//! result never depends on the stability of the sort or on the order the ions
//! were inserted in. Only the serialized text is reduced to scaled integers,
//! see [`scale_value`].
use std::cmp::Ordering;
use std::fmt::Write;

use num_bigint::BigInt;
use num_traits::Zero;

use crate::spectrum::{Ion, Spectrum, SpectrumType};
use crate::utils::scale_value;

pub const SPLASH_PREFIX: &str = "splash";

/// The version of the algorithm implemented here
pub const SPLASH_VERSION: u8 = 0;

/// The number of most intense ions the top ion block covers
pub const MAX_TOP_IONS: usize = 10;

/// The number of most intense ions the weighted sum covers
pub const MAX_SUM_IONS: usize = 100;

const ION_SEPARATOR: char = ' ';
const ION_PAIR_SEPARATOR: char = ':';

/// Compare two ions by intensity descending, then m/z ascending
pub fn intensity_order(a: &Ion, b: &Ion) -> Ordering {
    b.intensity()
        .total_cmp(&a.intensity())
        .then_with(|| a.mz().total_cmp(&b.mz()))
}

/// Compare two ions by m/z ascending, then intensity descending
pub fn mz_order(a: &Ion, b: &Ion) -> Ordering {
    a.mz()
        .total_cmp(&b.mz())
        .then_with(|| b.intensity().total_cmp(&a.intensity()))
}

/// The type and version block, e.g. `splash10` for a mass spectrum
pub fn encode_type_block(spectrum_type: SpectrumType) -> String {
    format!("{SPLASH_PREFIX}{}{SPLASH_VERSION}", spectrum_type.code())
}

/// A [`Spectrum`] with both canonical orderings of its ions computed up front.
///
/// The orderings borrow the ions of the source spectrum, which is never modified.
#[derive(Debug, Clone)]
pub struct CanonicalSpectrum<'a> {
    spectrum_type: SpectrumType,
    by_intensity: Vec<&'a Ion>,
    by_mz: Vec<&'a Ion>,
}

impl<'a> CanonicalSpectrum<'a> {
    pub fn new(spectrum: &'a Spectrum) -> Self {
        let mut by_intensity: Vec<&'a Ion> = spectrum.ions().iter().collect();
        by_intensity.sort_unstable_by(|a, b| intensity_order(a, b));

        let mut by_mz: Vec<&'a Ion> = spectrum.ions().iter().collect();
        by_mz.sort_unstable_by(|a, b| mz_order(a, b));

        Self {
            spectrum_type: spectrum.spectrum_type(),
            by_intensity,
            by_mz,
        }
    }

    pub fn spectrum_type(&self) -> SpectrumType {
        self.spectrum_type
    }

    pub fn is_empty(&self) -> bool {
        self.by_mz.is_empty()
    }

    /// The ions in intensity order
    pub fn by_intensity(&self) -> &[&'a Ion] {
        &self.by_intensity
    }

    /// The ions in m/z order
    pub fn by_mz(&self) -> &[&'a Ion] {
        &self.by_mz
    }

    pub fn type_block(&self) -> String {
        encode_type_block(self.spectrum_type)
    }

    /// The scaled m/z values of the [`MAX_TOP_IONS`] most intense ions,
    /// space separated
    pub fn top_ions_string(&self) -> String {
        let mut buffer = String::new();
        for (i, ion) in self.by_intensity.iter().take(MAX_TOP_IONS).enumerate() {
            if i > 0 {
                buffer.push(ION_SEPARATOR);
            }
            // Writing to a `String` cannot fail
            let _ = write!(buffer, "{}", scale_value(ion.mz()));
        }
        buffer
    }

    /// Every ion as `<mz>:<intensity>` scaled integers in m/z order,
    /// space separated
    pub fn spectrum_string(&self) -> String {
        let mut buffer = String::new();
        for (i, ion) in self.by_mz.iter().enumerate() {
            if i > 0 {
                buffer.push(ION_SEPARATOR);
            }
            let _ = write!(
                buffer,
                "{}{ION_PAIR_SEPARATOR}{}",
                scale_value(ion.mz()),
                scale_value(ion.intensity())
            );
        }
        buffer
    }

    /// `Σ scaled(mz) × scaled(intensity)` over the [`MAX_SUM_IONS`] most intense ions
    pub fn weighted_sum(&self) -> BigInt {
        self.by_intensity
            .iter()
            .take(MAX_SUM_IONS)
            .fold(BigInt::zero(), |acc, ion| {
                acc + BigInt::from(scale_value(ion.mz())) * BigInt::from(scale_value(ion.intensity()))
            })
    }
}
