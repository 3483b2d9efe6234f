//! Command-line argument definitions for the data importer.
//!
//! This module defines the CLI interface using the clap derive API; all real
//! work happens in the library, the options here only wire it up.

use crate::processor::Verbosity;
use crate::reader::CsvOptions;
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the data importer
///
/// Imports delimited data files through a batched record-by-record pipeline
/// with configurable failure handling and interactive stepping.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "data-importer",
    version,
    about = "Import CSV data through a batched record-by-record pipeline",
    long_about = "Reads a CSV file lazily, wraps every record into a positional message and \
                  drives a begin/item/batch/end processing lifecycle over it. Failed records \
                  either abort the run or are collected into a consolidated error report, \
                  and step-by-step mode allows interactive review of each record."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Import a CSV file and emit its records as JSON lines
    Import(ImportArgs),
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// Path to the CSV file to import
    #[arg(value_name = "FILE", help = "Path to the CSV file to import")]
    pub input_path: PathBuf,

    /// Field delimiter character
    #[arg(
        short = 'd',
        long = "delimiter",
        value_name = "CHAR",
        default_value = ",",
        help = "Field delimiter character"
    )]
    pub delimiter: char,

    /// Treat the first line as data instead of a header row
    ///
    /// Record keys become positional indices (0, 1, ...) instead of
    /// header-derived names.
    #[arg(long = "no-headers", help = "Treat the first line as data, not a header row")]
    pub no_headers: bool,

    /// Number of records processed between batch flushes
    #[arg(
        short = 'b',
        long = "batch-size",
        value_name = "N",
        default_value_t = 20,
        help = "Number of records processed between batch flushes"
    )]
    pub batch_size: usize,

    /// Pause for confirmation after each record except the last
    #[arg(long = "step", help = "Pause for confirmation after each record")]
    pub step: bool,

    /// Abort the run on the first failed record instead of collecting
    /// failures into the end-of-run error report
    #[arg(
        long = "pause-on-error",
        help = "Abort the run on the first failed record"
    )]
    pub pause_on_error: bool,

    /// Output file for imported records (JSON lines)
    ///
    /// If not specified, records are written to stdout.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output file for imported records (JSON lines)"
    )]
    pub output_path: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase output verbosity (-v: per-row trace, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl ImportArgs {
    /// Validate the import command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input_path.exists() {
            return Err(Error::invalid_options(format!(
                "Input file does not exist: {}",
                self.input_path.display()
            )));
        }

        if self.batch_size == 0 {
            return Err(Error::invalid_options(
                "Batch size must be greater than 0".to_string(),
            ));
        }

        if !self.delimiter.is_ascii() {
            return Err(Error::invalid_options(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }

        Ok(())
    }

    /// Reader options derived from the CLI flags
    pub fn csv_options(&self) -> CsvOptions {
        let mut options = CsvOptions::default().with_delimiter(self.delimiter as u8);
        if self.no_headers {
            options = options.with_no_headers();
        }
        options
    }

    /// Console verbosity tier derived from the CLI flags.
    ///
    /// Step mode exists to review records one by one, so it raises a plain
    /// run to the per-row trace tier.
    pub fn verbosity(&self) -> Verbosity {
        let verbosity = Verbosity::from_flags(self.verbose, self.quiet);
        if self.step && verbosity == Verbosity::Normal {
            return Verbosity::Verbose;
        }
        verbosity
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
