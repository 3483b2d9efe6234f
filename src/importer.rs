//! Pipeline driver sequencing the processor lifecycle over a record source.
//!
//! The importer pulls one record at a time, wraps it into a message and
//! drives `begin → item* → batch → end` in order, flushing batches at the
//! processor's configured cadence plus once for any unflushed remainder.
//! Processing is strictly sequential and single-threaded.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::Result;
use crate::exchange::MessageFactory;
use crate::processor::{Console, Handler, Processor};
use crate::reader::Reader;

/// Outcome summary of a completed import run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Records handed to the item phase
    pub records: u64,
    /// Batch flushes performed
    pub batches: u64,
    /// Item failures recorded under the collect-and-continue policy
    pub failures: usize,
}

impl ImportStats {
    /// Whether every record was handled without a recorded failure
    pub fn is_clean(&self) -> bool {
        self.failures == 0
    }
}

/// Drives one import run over a record source.
///
/// Owns the reader and the processor for exactly one pass; construct a new
/// importer for every run.
pub struct Importer<H: Handler, C: Console> {
    reader: Box<dyn Reader>,
    processor: Processor<H, C>,
    archive_path: Option<PathBuf>,
}

impl<H: Handler, C: Console> Importer<H, C> {
    pub fn new(reader: Box<dyn Reader>, processor: Processor<H, C>) -> Self {
        Self {
            reader,
            processor,
            archive_path: None,
        }
    }

    /// Record that the source file was extracted from an archive; the path is
    /// stamped onto every message of the run
    pub fn with_archive_path(mut self, archive_path: impl Into<PathBuf>) -> Self {
        self.archive_path = Some(archive_path.into());
        self
    }

    /// Run the full lifecycle to completion.
    ///
    /// Returns the first propagated error: an item failure under the
    /// pause-on-error policy, a declined step-mode confirmation, or a
    /// begin/batch/end hook failure. An empty source still runs `begin` and
    /// `end`.
    pub fn run(&mut self) -> Result<ImportStats> {
        let total = self.reader.count();
        let batch_size = self.processor.batch_size() as u64;
        info!(
            "Importing {} records from {} (batch size {})",
            total,
            self.reader.file_name(),
            batch_size
        );

        self.processor.begin(&MessageFactory::boundary(
            &*self.reader,
            self.archive_path.clone(),
        ))?;

        let mut stats = ImportStats::default();
        let mut pending = 0u64;
        let mut last_message = None;

        while self.reader.index() <= total {
            let message = MessageFactory::create(
                &*self.reader,
                self.reader.current().clone(),
                self.archive_path.clone(),
            );

            self.processor.item(&message)?;
            stats.records += 1;
            pending += 1;

            if pending == batch_size {
                debug!("Flushing batch at record {}", message.current_iteration());
                self.processor.batch(&message)?;
                stats.batches += 1;
                pending = 0;
            }

            last_message = Some(message);
            self.reader.advance();
        }

        if pending > 0 {
            if let Some(ref message) = last_message {
                debug!("Flushing final batch of {} records", pending);
                self.processor.batch(message)?;
                stats.batches += 1;
            }
        }

        self.processor.end(&MessageFactory::boundary(
            &*self.reader,
            self.archive_path.clone(),
        ))?;

        stats.failures = self.processor.errors().len();
        info!(
            "Import finished: {} records, {} batches, {} failures",
            stats.records, stats.batches, stats.failures
        );
        Ok(stats)
    }

    /// Read access to the processor, for inspecting the ledger or handler
    /// state after a run
    pub fn processor(&self) -> &Processor<H, C> {
        &self.processor
    }
}
