//! Computing SPLASH spectral hash identifiers.
//!
//! A SPLASH is made of four blocks joined by `-`:
//!
//! 1. `splash` followed by the [`SpectrumType`](crate::spectrum::SpectrumType) code and the algorithm version
//! 2. the first 10 hex characters of the SHA-256 of the 10 most intense ions' m/z values
//! 3. the first 20 hex characters of the SHA-256 of every `m/z:intensity` pair
//! 4. the sum of m/z × intensity over the 100 most intense ions, zero-padded to 10 digits
//!
//! ```
//! use mzsplash::spectrum::{Ion, Spectrum, SpectrumType};
//! use mzsplash::splash::splash_it;
//!
//! let spectrum = Spectrum::new(SpectrumType::Unknown, vec![Ion::new(100.123456, 50.0)]);
//! assert_eq!(
//!     splash_it(&spectrum).unwrap(),
//!     "splash00-12cac368c9-83709605137a88500cf2-0000005006"
//! );
//! ```
pub mod assembler;
pub mod encoding;
pub mod identifier;

pub use assembler::{splash, splash_it, try_splash, SplashError};
pub use encoding::{CanonicalSpectrum, SPLASH_VERSION};
pub use identifier::{Splash, SplashParseError};
