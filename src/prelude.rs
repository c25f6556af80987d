//! A set of commonly used types and functions
pub use crate::io::delimited::{format_spectrum, parse_spectrum};
pub use crate::spectrum::{Ion, Spectrum, SpectrumType};
pub use crate::splash::{splash, splash_it, try_splash, Splash, SplashError};
