//! DataImporter Library
//!
//! A Rust library for importing delimited data files through a batched,
//! record-by-record processing pipeline.
//!
//! This library provides tools for:
//! - Reading CSV files lazily with an eagerly computed record count
//! - Wrapping each record into a positional message with file provenance
//! - Driving a begin/item/batch/end processor lifecycle over a record source
//! - Isolating per-item failures with abort-on-error or collect-and-continue
//!   policies
//! - Interactive step-by-step review of records during an import
//! - Verbosity-tiered progress and error reporting on the terminal

pub mod error;
pub mod importer;

pub mod exchange {
    pub mod factory;
    pub mod message;

    pub use self::factory::MessageFactory;
    pub use self::message::Message;
}

pub mod reader {
    pub mod csv_reader;
    pub mod record;

    pub use self::csv_reader::{CsvOptions, CsvReader};
    pub use self::record::Record;

    use std::path::Path;

    /// Contract for a finite, ordered, lazy record source.
    ///
    /// A reader is bound to one concrete resource for one import pass; it is
    /// advanced externally by the pipeline driver and is not reusable across
    /// two independent passes.
    pub trait Reader {
        /// Total number of records, computed eagerly at construction.
        ///
        /// Stable for the life of the instance.
        fn count(&self) -> u64;

        /// Current 1-based position.
        ///
        /// 0 for a source that has not yet been primed with its first record,
        /// `count() + 1` once the source is exhausted.
        fn index(&self) -> u64;

        /// The record at the current position.
        ///
        /// Returns the empty sentinel record once the source is exhausted.
        /// Idempotent between calls to [`Reader::advance`].
        fn current(&self) -> &Record;

        /// Advance the position by one.
        ///
        /// Past the end this stabilizes on the empty sentinel; exhaustion is
        /// a normal terminal state, not an error.
        fn advance(&mut self);

        /// Whether records are raw field mappings that still need conversion
        /// into typed values downstream.
        fn is_denormalizable(&self) -> bool;

        /// File name of the backing resource.
        fn file_name(&self) -> &str;

        /// Full path of the backing resource.
        fn file_path(&self) -> &Path;
    }
}

pub mod processor {
    pub mod console;
    pub mod term;

    mod lifecycle;

    pub use self::console::{Console, Verbosity};
    pub use self::lifecycle::{ErrorLedger, Handler, Processor, ProcessorOptions};
    pub use self::term::TermConsole;

    #[cfg(test)]
    pub mod tests;
}

pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use error::{Error, Result};
pub use exchange::{Message, MessageFactory};
pub use importer::{ImportStats, Importer};
pub use processor::{Handler, Processor, ProcessorOptions};
pub use reader::{CsvReader, Reader, Record};
