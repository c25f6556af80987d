//! `mzsplash` computes SPLASH spectral hash identifiers, compact fingerprints
//! that let identical spectra be matched across datasets and tools without
//! comparing their peak lists.
//!
//! ```
//! use mzsplash::prelude::*;
//!
//! let spectrum = parse_spectrum("100:1 101:2 103:3", SpectrumType::MS).unwrap();
//! let splash = splash_it(&spectrum).unwrap();
//! assert!(splash.starts_with("splash10-"));
//! ```
pub mod batch;
pub mod io;
pub mod prelude;
pub mod spectrum;
pub mod splash;
pub mod utils;
pub mod validation;

pub use crate::spectrum::{Ion, Spectrum, SpectrumType};
pub use crate::splash::{splash, splash_it, try_splash, Splash, SplashError};

