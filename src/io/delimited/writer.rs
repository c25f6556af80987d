use std::io::{self, prelude::*, BufWriter};

use super::reader::{SpectrumRecord, DEFAULT_DELIMITER};

/// Writes `<id>,<splash>[,<spectrum>]` lines, the counterpart of
/// [`SpectrumReaderType`](super::SpectrumReaderType).
pub struct SplashWriterType<W: io::Write> {
    handle: BufWriter<W>,
    delimiter: char,
    include_spectrum: bool,
    records_written: usize,
}

pub type SplashWriter = SplashWriterType<Box<dyn io::Write + Send>>;

impl<W: io::Write> SplashWriterType<W> {
    pub fn new(handle: W) -> Self {
        Self {
            handle: BufWriter::new(handle),
            delimiter: DEFAULT_DELIMITER,
            include_spectrum: true,
            records_written: 0,
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Whether to repeat the spectrum string as a third column
    pub fn with_spectrum(mut self, include_spectrum: bool) -> Self {
        self.include_spectrum = include_spectrum;
        self
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    pub fn write_splash(&mut self, id: &str, splash: &str, spectrum_text: &str) -> io::Result<()> {
        let mut sep = [0u8; 4];
        let sep = self.delimiter.encode_utf8(&mut sep).as_bytes();
        self.handle.write_all(id.as_bytes())?;
        self.handle.write_all(sep)?;
        self.handle.write_all(splash.as_bytes())?;
        if self.include_spectrum {
            self.handle.write_all(sep)?;
            self.handle.write_all(spectrum_text.as_bytes())?;
        }
        self.handle.write_all(b"\n")?;
        self.records_written += 1;
        Ok(())
    }

    pub fn write_record(&mut self, record: &SpectrumRecord, splash: &str) -> io::Result<()> {
        self.write_splash(&record.id, splash, &record.source_text)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.handle.flush()
    }

    /// Flush any buffered output and return the wrapped stream
    pub fn into_inner(self) -> io::Result<W> {
        self.handle.into_inner().map_err(|e| e.into_error())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::delimited::parse_spectrum;
    use crate::spectrum::SpectrumType;

    #[test]
    fn test_write_record() -> io::Result<()> {
        let record = SpectrumRecord::new(
            "spec-1".into(),
            "100:1 101:2".into(),
            parse_spectrum("100:1 101:2", SpectrumType::MS).unwrap(),
        );
        let mut writer = SplashWriterType::new(Vec::new());
        writer.write_record(&record, "splash10-aaaaaaaaaa-bbbbbbbbbbbbbbbbbbbb-0000000000")?;
        writer.write_splash("spec-2", "splash10-cccccccccc-dddddddddddddddddddd-0000000001", "")?;
        assert_eq!(writer.records_written(), 2);
        let text = String::from_utf8(writer.into_inner()?).unwrap();
        assert_eq!(
            text,
            "spec-1,splash10-aaaaaaaaaa-bbbbbbbbbbbbbbbbbbbb-0000000000,100:1 101:2\n\
             spec-2,splash10-cccccccccc-dddddddddddddddddddd-0000000001,\n"
        );
        Ok(())
    }

    #[test]
    fn test_without_spectrum() -> io::Result<()> {
        let mut writer = SplashWriterType::new(Vec::new())
            .with_spectrum(false)
            .with_delimiter('\t');
        writer.write_splash("x", "splash10-aaaaaaaaaa-bbbbbbbbbbbbbbbbbbbb-0000000000", "100:1")?;
        let text = String::from_utf8(writer.into_inner()?).unwrap();
        assert_eq!(text, "x\tsplash10-aaaaaaaaaa-bbbbbbbbbbbbbbbbbbbb-0000000000\n");
        Ok(())
    }
}
