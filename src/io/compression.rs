use std::fs;
use std::io::{self, prelude::*, BufReader};
use std::path;

use flate2::bufread::MultiGzDecoder;

pub fn is_gzipped(header: &[u8]) -> bool {
    header.starts_with(b"\x1f\x8b")
}

pub fn is_gzipped_extension(path: path::PathBuf) -> (bool, path::PathBuf) {
    if let Some(ext) = path.extension() {
        if ext.to_ascii_lowercase() == "gz" {
            (true, path.with_extension(""))
        } else {
            (false, path)
        }
    } else {
        (false, path)
    }
}

/// Wrap `stream` in a buffered reader, transparently decompressing it
/// if it begins with the GZIP magic bytes.
///
/// The stream does not need to support seeking, the header is inspected
/// through the read buffer.
pub fn open_stream<R: Read + Send + 'static>(stream: R) -> io::Result<Box<dyn BufRead + Send>> {
    let mut handle = BufReader::new(stream);
    let header = handle.fill_buf()?;
    if is_gzipped(header) {
        log::debug!("Decompressing GZIP stream");
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(handle))))
    } else {
        Ok(Box::new(handle))
    }
}

/// Open the file at `path` for reading, decompressing it if it is GZIP compressed
pub fn open_path<P: Into<path::PathBuf>>(path: P) -> io::Result<Box<dyn BufRead + Send>> {
    let path: path::PathBuf = path.into();
    let (has_gz_extension, _) = is_gzipped_extension(path.clone());
    if has_gz_extension {
        log::debug!("{} has a .gz extension", path.display());
    }
    let handle = fs::File::open(&path)?;
    open_stream(handle)
}
