//! # mzsplash
//!
//! A command-line tool for computing SPLASH spectral hash identifiers.
//!
//! ```bash
//! # Hash every `<id>,<spectrum>` record of a file
//! mzsplash hash spectra.csv -o spectra.splash.csv
//!
//! # Report spectra that share a SPLASH
//! mzsplash duplicates spectra.splash.csv
//!
//! # Hash a single spectrum
//! mzsplash splash "100:1 101:2 103:3"
//! ```
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::exit;
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::{error, info, warn};

use mzsplash::batch::{splash_records, BatchStatistics};
use mzsplash::io::delimited::DEFAULT_DELIMITER;
use mzsplash::io::{open_path, open_stream, SpectrumReader, SplashWriter, SplashWriterType};
use mzsplash::prelude::*;
use mzsplash::validation::{read_results, DuplicateFinder};

/// The C++ reference tool's relative intensity scale
const DEFAULT_RELATIVE_SCALE: &str = "1000";

/// Compute SPLASH spectral hash identifiers
#[derive(Parser)]
#[command(name = "mzsplash")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash every `<id>,<spectrum>` record of a delimited file
    Hash {
        /// Input file path, `-` for STDIN. GZIP compressed input is detected automatically.
        #[arg(value_name = "INPUT")]
        input: String,

        /// Output file path, `-` or omitted for STDOUT
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<String>,

        /// The spectrum type of every record, by name or code
        #[arg(short = 't', long, default_value = "ms")]
        spectrum_type: SpectrumType,

        /// Rescale intensities so the base peak has this intensity before hashing
        #[arg(long, value_name = "SCALE", num_args = 0..=1, default_missing_value = DEFAULT_RELATIVE_SCALE)]
        relative: Option<f64>,

        /// Do not repeat the spectrum string in the output
        #[arg(long)]
        no_spectrum: bool,

        /// Column delimiter of the input and output
        #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
        delimiter: char,

        /// Number of records hashed together
        #[arg(short, long, default_value_t = 10000)]
        batch_size: usize,

        /// Log progress every this many records
        #[arg(short, long, default_value_t = 10000)]
        progress: usize,
    },

    /// Report records that share a SPLASH in the output of `hash`
    Duplicates {
        /// Input file path, `-` for STDIN
        #[arg(value_name = "INPUT")]
        input: String,

        /// Column delimiter of the input
        #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
        delimiter: char,
    },

    /// Hash a single `mz:intensity` spectrum string
    Splash {
        #[arg(value_name = "SPECTRUM")]
        spectrum: String,

        /// The spectrum type, by name or code
        #[arg(short = 't', long, default_value = "ms")]
        spectrum_type: SpectrumType,
    },
}

fn open_input(input: &str) -> io::Result<Box<dyn io::BufRead + Send>> {
    if input == "-" {
        open_stream(io::stdin())
    } else {
        open_path(PathBuf::from(input))
    }
}

fn open_output(output: Option<&str>) -> io::Result<Box<dyn io::Write + Send>> {
    match output {
        None | Some("-") => Ok(Box::new(io::stdout())),
        Some(path) => Ok(Box::new(fs::File::create(path)?)),
    }
}

#[allow(clippy::too_many_arguments)]
fn hash_file(
    input: &str,
    output: Option<&str>,
    spectrum_type: SpectrumType,
    relative: Option<f64>,
    no_spectrum: bool,
    delimiter: char,
    batch_size: usize,
    progress: usize,
) -> io::Result<bool> {
    let start = Instant::now();
    let mut reader = SpectrumReader::new(open_input(input)?)
        .with_spectrum_type(spectrum_type)
        .with_delimiter(delimiter);
    let mut writer: SplashWriter = SplashWriterType::new(open_output(output)?)
        .with_delimiter(delimiter)
        .with_spectrum(!no_spectrum);

    let mut stats = BatchStatistics::default();
    let mut parse_failures = 0usize;
    let batch_size = batch_size.max(1);
    let progress = progress.max(1);
    let mut batch = Vec::with_capacity(batch_size);
    let mut done = false;

    while !done {
        while batch.len() < batch_size {
            match reader.next() {
                Some(Ok(mut record)) => {
                    if let Some(scale) = relative {
                        record.spectrum = record.spectrum.to_relative(scale);
                    }
                    batch.push(record);
                }
                Some(Err(e)) => {
                    warn!("Skipping record: {e}");
                    parse_failures += 1;
                }
                None => {
                    done = true;
                    break;
                }
            }
        }

        for result in splash_records(std::mem::take(&mut batch)) {
            stats.add_result(&result);
            match &result.splash {
                Ok(splash) => writer.write_record(&result.record, splash)?,
                Err(e) => warn!("Failed to hash {}: {e}", result.record.id),
            }
            if stats.count % progress == 0 {
                let elapsed = start.elapsed();
                info!(
                    "Processed {} spectra, {:.2} ms average per spectrum",
                    stats.count,
                    elapsed.as_secs_f64() * 1000.0 / stats.count as f64
                );
            }
        }
    }
    writer.flush()?;

    info!(
        "Finished in {:.2} seconds, wrote {} records",
        start.elapsed().as_secs_f64(),
        writer.records_written()
    );
    info!("{stats}");
    if parse_failures > 0 {
        warn!("{parse_failures} records could not be read");
    }
    Ok(parse_failures == 0 && stats.failures == 0)
}

fn find_duplicates(input: &str, delimiter: char) -> io::Result<bool> {
    let mut finder = DuplicateFinder::new();
    let mut failures = 0usize;
    for result in read_results(open_input(input)?, delimiter) {
        match result {
            Ok((origin, splash)) => finder.add(&splash, origin),
            Err(e) => {
                warn!("Skipping line: {e}");
                failures += 1;
            }
        }
    }

    let mut out = io::BufWriter::new(io::stdout().lock());
    for group in finder.duplicates() {
        for origin in group.origins {
            writeln!(out, "{}{delimiter}{origin}", group.splash)?;
        }
    }
    out.flush()?;
    info!(
        "{} unique SPLASHes, duplicates found: {}",
        finder.unique_count(),
        finder.duplicate_count()
    );
    Ok(failures == 0)
}

fn splash_one(text: &str, spectrum_type: SpectrumType) -> io::Result<bool> {
    let spectrum = match parse_spectrum(text, spectrum_type) {
        Ok(spectrum) => spectrum,
        Err(e) => {
            error!("{e}");
            return Ok(false);
        }
    };
    match splash_it(&spectrum) {
        Ok(splash) => {
            println!("{splash}");
            Ok(true)
        }
        Err(e) => {
            error!("{e}");
            Ok(false)
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let succeeded = match cli.command {
        Commands::Hash {
            input,
            output,
            spectrum_type,
            relative,
            no_spectrum,
            delimiter,
            batch_size,
            progress,
        } => hash_file(
            &input,
            output.as_deref(),
            spectrum_type,
            relative,
            no_spectrum,
            delimiter,
            batch_size,
            progress,
        )?,
        Commands::Duplicates { input, delimiter } => find_duplicates(&input, delimiter)?,
        Commands::Splash {
            spectrum,
            spectrum_type,
        } => splash_one(&spectrum, spectrum_type)?,
    };

    if !succeeded {
        exit(1);
    }
    Ok(())
}
