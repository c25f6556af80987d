pub(crate) mod compression;
pub mod delimited;

pub use crate::io::compression::{is_gzipped, open_path, open_stream};
pub use crate::io::delimited::{
    parse_spectrum, SpectrumParserError, SpectrumReader, SpectrumReaderType, SpectrumRecord,
    SplashWriter, SplashWriterType,
};
