//! The data model for spectra to be hashed.
//!
//! A [`Spectrum`] is nothing more than a [`SpectrumType`] tag and an unordered
//! list of [`Ion`]s. Any ordering a hashing procedure needs is imposed at
//! encoding time, see [`crate::splash::encoding`].
pub mod ion;
pub mod spectrum_types;

pub use ion::Ion;
pub use spectrum_types::{Spectrum, SpectrumType, SpectrumTypeError};
