use std::fs;
use std::io::{self, prelude::*};
use std::num::ParseFloatError;
use std::path;

use thiserror::Error;

use crate::io::compression::{open_path, open_stream};
use crate::spectrum::{Ion, Spectrum, SpectrumType};

/// The default column delimiter of a spectrum record file
pub const DEFAULT_DELIMITER: char = ',';

const ION_PAIR_SEPARATOR: char = ':';

/// Errors that may occur while parsing a single spectrum string
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IonParseError {
    #[error("Ion {0:?} is not an m/z:intensity pair")]
    MalformedIonPair(String),
    #[error("Ion {0:?} contains an invalid number: {1}")]
    InvalidNumber(String, #[source] ParseFloatError),
}

/// Errors that may occur while reading spectrum records
#[derive(Debug, Error)]
pub enum SpectrumParserError {
    #[error("Encountered an IO error: {0}")]
    IOError(
        #[from]
        #[source]
        io::Error,
    ),
    #[error("Line {0} does not have an identifier and a spectrum column")]
    MissingColumns(usize),
    #[error("Line {line} contains a malformed spectrum: {source}")]
    MalformedSpectrum {
        line: usize,
        #[source]
        source: IonParseError,
    },
}

/// Parse a whitespace-separated list of `mz:intensity` pairs, e.g. `"100:1 101:2 103:3"`.
///
/// Surrounding whitespace of any amount is ignored. A blank string produces a
/// [`Spectrum`] with no ions.
pub fn parse_spectrum(text: &str, spectrum_type: SpectrumType) -> Result<Spectrum, IonParseError> {
    let ions = text
        .split_whitespace()
        .map(parse_ion)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Spectrum::new(spectrum_type, ions))
}

fn parse_ion(token: &str) -> Result<Ion, IonParseError> {
    let (mz, intensity) = token
        .split_once(ION_PAIR_SEPARATOR)
        .ok_or_else(|| IonParseError::MalformedIonPair(token.to_string()))?;
    let mz = mz
        .parse::<f64>()
        .map_err(|e| IonParseError::InvalidNumber(token.to_string(), e))?;
    let intensity = intensity
        .parse::<f64>()
        .map_err(|e| IonParseError::InvalidNumber(token.to_string(), e))?;
    Ok(Ion::new(mz, intensity))
}

/// Write a spectrum back out in the `mz:intensity` text form [`parse_spectrum`] reads
pub fn format_spectrum(spectrum: &Spectrum) -> String {
    spectrum
        .ions()
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A single identified spectrum read from a record file
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumRecord {
    /// The identifier in the first column
    pub id: String,
    /// The spectrum string exactly as it appeared in the file
    pub source_text: String,
    pub spectrum: Spectrum,
}

impl SpectrumRecord {
    pub fn new(id: String, source_text: String, spectrum: Spectrum) -> Self {
        Self {
            id,
            source_text,
            spectrum,
        }
    }
}

/**
A reader for delimited spectrum record files, one spectrum per line:

```text
<id>,<mz>:<intensity> <mz>:<intensity> ...
```

Any columns after the spectrum are ignored, and blank lines are skipped. Every
spectrum is given the same [`SpectrumType`].

Iterating yields one [`Result`] per record so a caller can skip a malformed
line and carry on.
*/
pub struct SpectrumReaderType<R: BufRead> {
    handle: R,
    spectrum_type: SpectrumType,
    delimiter: char,
    line_number: usize,
    buffer: String,
}

pub type SpectrumReader = SpectrumReaderType<Box<dyn BufRead + Send>>;

impl<R: BufRead> SpectrumReaderType<R> {
    pub fn new(handle: R) -> Self {
        Self {
            handle,
            spectrum_type: SpectrumType::default(),
            delimiter: DEFAULT_DELIMITER,
            line_number: 0,
            buffer: String::new(),
        }
    }

    pub fn with_spectrum_type(mut self, spectrum_type: SpectrumType) -> Self {
        self.spectrum_type = spectrum_type;
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn spectrum_type(&self) -> SpectrumType {
        self.spectrum_type
    }

    /// The number of lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn parse_record(&self, line: &str) -> Result<SpectrumRecord, SpectrumParserError> {
        let mut columns = line.split(self.delimiter);
        let id = columns.next().map(str::trim).unwrap_or_default();
        let source_text = columns
            .next()
            .ok_or(SpectrumParserError::MissingColumns(self.line_number))?
            .trim();
        let spectrum = parse_spectrum(source_text, self.spectrum_type).map_err(|source| {
            SpectrumParserError::MalformedSpectrum {
                line: self.line_number,
                source,
            }
        })?;
        Ok(SpectrumRecord::new(
            id.to_string(),
            source_text.to_string(),
            spectrum,
        ))
    }

    /// Read the next record, or `None` at the end of the stream
    pub fn read_next(&mut self) -> Option<Result<SpectrumRecord, SpectrumParserError>> {
        loop {
            self.buffer.clear();
            match self.handle.read_line(&mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_number += 1;
            let line = self.buffer.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() {
                continue;
            }
            return Some(self.parse_record(line));
        }
    }
}

impl SpectrumReader {
    /// Open a record file, decompressing it if needed
    pub fn open_path<P: Into<path::PathBuf>>(path: P) -> io::Result<Self> {
        Ok(Self::new(open_path(path)?))
    }

    pub fn open_file(source: fs::File) -> io::Result<Self> {
        Ok(Self::new(open_stream(source)?))
    }

    /// Read records from standard input
    pub fn stdin() -> io::Result<Self> {
        Ok(Self::new(open_stream(io::stdin())?))
    }
}

impl<R: BufRead> Iterator for SpectrumReaderType<R> {
    type Item = Result<SpectrumRecord, SpectrumParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_spectrum() {
        let spec = parse_spectrum("100:1 101:2 103:3", SpectrumType::MS).unwrap();
        assert_eq!(spec.len(), 3);
        assert_eq!(spec.ions()[2], Ion::new(103.0, 3.0));

        let spec = parse_spectrum("  \t 66.0463:2.1827\t105.0698:7.9976  ", SpectrumType::NMR).unwrap();
        assert_eq!(spec.spectrum_type(), SpectrumType::NMR);
        assert_eq!(spec.ions()[0], Ion::new(66.0463, 2.1827));

        assert!(parse_spectrum("", SpectrumType::MS).unwrap().is_empty());
        assert_eq!(
            parse_spectrum("100:1 101", SpectrumType::MS),
            Err(IonParseError::MalformedIonPair("101".to_string()))
        );
        assert!(matches!(
            parse_spectrum("100:1 1o1:2", SpectrumType::MS),
            Err(IonParseError::InvalidNumber(_, _))
        ));
    }

    #[test]
    fn test_format_spectrum() {
        let spec = parse_spectrum("100:1 101.5:2.25", SpectrumType::MS).unwrap();
        assert_eq!(format_spectrum(&spec), "100:1 101.5:2.25");
    }

    #[test_log::test]
    fn test_reader() {
        let data = "first,100:1 101:2 103:3\n\nsecond,50.5:10,extra\r\nthird\nfourth,100:x\nfifth,\n";
        let mut reader = SpectrumReaderType::new(io::Cursor::new(data))
            .with_spectrum_type(SpectrumType::UV);

        let first = reader.next().unwrap().unwrap();
        assert_eq!(first.id, "first");
        assert_eq!(first.source_text, "100:1 101:2 103:3");
        assert_eq!(first.spectrum.len(), 3);
        assert_eq!(first.spectrum.spectrum_type(), SpectrumType::UV);

        let second = reader.next().unwrap().unwrap();
        assert_eq!(second.id, "second");
        assert_eq!(second.spectrum.ions(), &[Ion::new(50.5, 10.0)]);
        assert_eq!(reader.line_number(), 3);

        assert!(matches!(
            reader.next(),
            Some(Err(SpectrumParserError::MissingColumns(4)))
        ));
        assert!(matches!(
            reader.next(),
            Some(Err(SpectrumParserError::MalformedSpectrum { line: 5, .. }))
        ));

        let fifth = reader.next().unwrap().unwrap();
        assert!(fifth.spectrum.is_empty());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_delimiter() {
        let data = "a\t100:1 200:2\n";
        let records: Vec<_> = SpectrumReaderType::new(io::Cursor::new(data))
            .with_delimiter('\t')
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].spectrum.len(), 2);
    }

    #[test_log::test]
    fn test_open_path() -> io::Result<()> {
        let reader = SpectrumReader::open_path("./test/data/spectra.csv")?;
        let records: Vec<_> = reader.collect::<Result<_, _>>().map_err(io::Error::other)?;
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].id, "caffeine");
        Ok(())
    }

    #[test_log::test]
    fn test_open_gzipped_path() -> io::Result<()> {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("spectra.csv.gz");
        let mut encoder = GzEncoder::new(fs::File::create(&path)?, Compression::default());
        encoder.write_all(b"a,100:1 200:2\nb,300:3\n")?;
        encoder.finish()?;

        let records: Vec<_> = SpectrumReader::open_path(&path)?
            .collect::<Result<_, _>>()
            .map_err(io::Error::other)?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].spectrum.ions(), &[Ion::new(300.0, 3.0)]);
        Ok(())
    }
}
