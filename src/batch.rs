//! Hashing many spectrum records at once.
//!
//! When the `parallelism` feature is enabled, records are hashed on the
//! [`rayon`] thread pool. Results are always returned in input order.
use std::fmt::Display;
use std::time::{Duration, Instant};

#[cfg(feature = "parallelism")]
use rayon::prelude::*;

use crate::io::SpectrumRecord;
use crate::splash::{splash_it, SplashError};

/// The outcome of hashing one [`SpectrumRecord`]
#[derive(Debug, Clone)]
pub struct SplashResult {
    pub record: SpectrumRecord,
    pub splash: Result<String, SplashError>,
    pub elapsed: Duration,
}

impl SplashResult {
    pub fn is_ok(&self) -> bool {
        self.splash.is_ok()
    }
}

fn splash_record(record: SpectrumRecord) -> SplashResult {
    let start = Instant::now();
    let splash = splash_it(&record.spectrum);
    let elapsed = start.elapsed();
    SplashResult {
        record,
        splash,
        elapsed,
    }
}

/// Hash every record in `records`, preserving their order
pub fn splash_records(records: Vec<SpectrumRecord>) -> Vec<SplashResult> {
    #[cfg(feature = "parallelism")]
    {
        records.into_par_iter().map(splash_record).collect()
    }
    #[cfg(not(feature = "parallelism"))]
    {
        records.into_iter().map(splash_record).collect()
    }
}

/// Running timing statistics over hashed spectra
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatchStatistics {
    pub count: usize,
    pub failures: usize,
    pub total: Duration,
    pub min: Option<Duration>,
    pub max: Option<Duration>,
}

impl BatchStatistics {
    pub fn add(&mut self, elapsed: Duration, succeeded: bool) {
        self.count += 1;
        if !succeeded {
            self.failures += 1;
        }
        self.total += elapsed;
        self.min = Some(self.min.map_or(elapsed, |m| m.min(elapsed)));
        self.max = Some(self.max.map_or(elapsed, |m| m.max(elapsed)));
    }

    pub fn add_result(&mut self, result: &SplashResult) {
        self.add(result.elapsed, result.is_ok())
    }

    pub fn mean(&self) -> Option<Duration> {
        if self.count == 0 {
            None
        } else {
            Some(self.total / self.count as u32)
        }
    }

    pub fn merge(&mut self, other: &Self) {
        self.count += other.count;
        self.failures += other.failures;
        self.total += other.total;
        self.min = match (self.min, other.min) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.max = match (self.max, other.max) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }
}

impl<'a> FromIterator<&'a SplashResult> for BatchStatistics {
    fn from_iter<T: IntoIterator<Item = &'a SplashResult>>(iter: T) -> Self {
        let mut stats = Self::default();
        for result in iter {
            stats.add_result(result);
        }
        stats
    }
}

impl Display for BatchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ms = |d: Option<Duration>| d.map_or(0.0, |d| d.as_secs_f64() * 1000.0);
        write!(
            f,
            "{} spectra ({} failed), total {:.3} ms, mean {:.3} ms, min {:.3} ms, max {:.3} ms",
            self.count,
            self.failures,
            self.total.as_secs_f64() * 1000.0,
            ms(self.mean()),
            ms(self.min),
            ms(self.max),
        )
    }
}
