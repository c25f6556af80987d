use num_bigint::BigInt;
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::encoding::CanonicalSpectrum;
use super::identifier::{Splash, SPECTRUM_HASH_LENGTH, TOP_IONS_HASH_LENGTH};
use crate::spectrum::Spectrum;

/// Divisor applied to the weighted sum, undoing the `10^6` scaling of both factors
const SUM_DIVISOR: u64 = 1_000_000_000_000;

/// Errors that prevent a spectrum from being hashed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SplashError {
    #[error("No spectrum was provided")]
    MissingSpectrum,
    #[error("The spectrum contains no ions")]
    EmptySpectrum,
}

/// Hash `text` with SHA-256 and keep the first `length` lowercase hex characters
fn truncated_digest(text: &str, length: usize) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut hex = base16ct::lower::encode_string(&digest);
    hex.truncate(length);
    hex
}

/// Compute the [`Splash`] of a spectrum.
pub fn splash(spectrum: &Spectrum) -> Result<Splash, SplashError> {
    if spectrum.is_empty() {
        return Err(SplashError::EmptySpectrum);
    }
    let canonical = CanonicalSpectrum::new(spectrum);

    let top_ions = canonical.top_ions_string();
    log::trace!("Top ion block source: {top_ions}");
    let top_ions_hash = truncated_digest(&top_ions, TOP_IONS_HASH_LENGTH);

    let encoded = canonical.spectrum_string();
    log::trace!("Spectrum block source: {encoded}");
    let spectrum_hash = truncated_digest(&encoded, SPECTRUM_HASH_LENGTH);

    let weighted_sum = canonical.weighted_sum() / BigInt::from(SUM_DIVISOR);
    log::trace!("Weighted sum: {weighted_sum}");

    Ok(Splash::new(
        canonical.spectrum_type(),
        top_ions_hash,
        spectrum_hash,
        weighted_sum,
    ))
}

/// Compute the SPLASH string of a spectrum,
/// e.g. `splash10-b4a699ba3f-a128435ac01cbfe72c60-0000013172`
pub fn splash_it(spectrum: &Spectrum) -> Result<String, SplashError> {
    splash(spectrum).map(|s| s.to_string())
}

/// As [`splash_it`], but for a spectrum which may be absent
pub fn try_splash(spectrum: Option<&Spectrum>) -> Result<String, SplashError> {
    match spectrum {
        Some(spectrum) => splash_it(spectrum),
        None => Err(SplashError::MissingSpectrum),
    }
}
