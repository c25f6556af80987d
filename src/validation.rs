//! Cross-checking SPLASH results, e.g. finding spectra that hash identically.
use std::collections::BTreeMap;
use std::io::{self, prelude::*};

use thiserror::Error;

use crate::splash::{Splash, SplashParseError};

#[derive(Debug, Error)]
pub enum SplashResultError {
    #[error("Encountered an IO error: {0}")]
    IOError(
        #[from]
        #[source]
        io::Error,
    ),
    #[error("Line {0} does not have an identifier and a SPLASH column")]
    MissingColumns(usize),
    #[error("Line {line} contains an invalid SPLASH: {source}")]
    InvalidSplash {
        line: usize,
        #[source]
        source: SplashParseError,
    },
}

/// Parse an `<id>,<splash>[,...]` result line as written by
/// [`SplashWriterType`](crate::io::SplashWriterType)
pub fn parse_result_line(
    line: &str,
    delimiter: char,
    line_number: usize,
) -> Result<(String, Splash), SplashResultError> {
    let mut columns = line.split(delimiter);
    let id = columns.next().map(str::trim).unwrap_or_default();
    let splash = columns
        .next()
        .ok_or(SplashResultError::MissingColumns(line_number))?
        .parse::<Splash>()
        .map_err(|source| SplashResultError::InvalidSplash {
            line: line_number,
            source,
        })?;
    Ok((id.to_string(), splash))
}

/// Read every result line from `handle`, skipping blank lines
pub fn read_results<R: BufRead>(
    handle: R,
    delimiter: char,
) -> impl Iterator<Item = Result<(String, Splash), SplashResultError>> {
    handle
        .lines()
        .enumerate()
        .filter_map(move |(i, line)| match line {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(parse_result_line(&line, delimiter, i + 1)),
            Err(e) => Some(Err(e.into())),
        })
}

/// A set of spectra sharing one SPLASH
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateGroup<'a> {
    pub splash: &'a str,
    pub origins: &'a [String],
}

/// Groups spectrum identifiers by their SPLASH to find duplicates.
///
/// Groups are visited in sorted SPLASH order, and the origins within a
/// group in the order they were added.
#[derive(Debug, Default, Clone)]
pub struct DuplicateFinder {
    groups: BTreeMap<String, Vec<String>>,
}

impl DuplicateFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, splash: &Splash, origin: impl Into<String>) {
        self.add_str(splash.to_string(), origin)
    }

    pub fn add_str(&mut self, splash: impl Into<String>, origin: impl Into<String>) {
        let origins = self.groups.entry(splash.into()).or_default();
        origins.push(origin.into());
        if origins.len() > 1 {
            log::debug!("Duplicated SPLASH, {} origins so far", origins.len());
        }
    }

    /// The number of distinct SPLASHes seen
    pub fn unique_count(&self) -> usize {
        self.groups.len()
    }

    /// The number of records that repeat an already seen SPLASH
    pub fn duplicate_count(&self) -> usize {
        self.groups.values().map(|v| v.len() - 1).sum()
    }

    pub fn duplicates(&self) -> impl Iterator<Item = DuplicateGroup<'_>> {
        self.groups
            .iter()
            .filter(|(_, origins)| origins.len() > 1)
            .map(|(splash, origins)| DuplicateGroup {
                splash: splash.as_str(),
                origins: origins.as_slice(),
            })
    }
}

impl Extend<(String, Splash)> for DuplicateFinder {
    fn extend<T: IntoIterator<Item = (String, Splash)>>(&mut self, iter: T) {
        for (origin, splash) in iter {
            self.add(&splash, origin);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const A: &str = "splash10-b4a699ba3f-a128435ac01cbfe72c60-0000013172";
    const B: &str = "splash10-12cac368c9-83709605137a88500cf2-0000005006";

    #[test]
    fn test_find_duplicates() {
        let mut finder = DuplicateFinder::new();
        finder.add_str(A, "x");
        finder.add_str(B, "y");
        finder.add_str(A, "z");
        finder.add_str(A, "w");
        assert_eq!(finder.unique_count(), 2);
        assert_eq!(finder.duplicate_count(), 2);

        let groups: Vec<_> = finder.duplicates().collect();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].splash, A);
        assert_eq!(groups[0].origins, &["x", "z", "w"]);
    }

    #[test_log::test]
    fn test_read_results() {
        let data = format!("x,{A},100:1\n\ny,{B}\nz,{A}\nbad\nworse,splash10-zz\n");
        let results: Vec<_> = read_results(io::Cursor::new(data), ',').collect();
        assert_eq!(results.len(), 5);
        assert!(matches!(results[3], Err(SplashResultError::MissingColumns(5))));
        assert!(matches!(
            results[4],
            Err(SplashResultError::InvalidSplash { line: 6, .. })
        ));

        let mut finder = DuplicateFinder::new();
        finder.extend(results.into_iter().filter_map(Result::ok));
        assert_eq!(finder.duplicate_count(), 1);
        let groups: Vec<_> = finder.duplicates().collect();
        assert_eq!(groups[0].origins, &["x", "z"]);
    }
}
