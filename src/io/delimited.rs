//! Read spectra from, and write SPLASH results to, delimited text files
//! holding one record per line.
mod reader;
mod writer;

pub use reader::{
    format_spectrum, parse_spectrum, IonParseError, SpectrumParserError, SpectrumReader,
    SpectrumReaderType, SpectrumRecord, DEFAULT_DELIMITER,
};
pub use writer::{SplashWriter, SplashWriterType};
