//! Processor lifecycle state machine.
//!
//! Drives user-supplied lifecycle callbacks over the message stream while
//! tracking per-item failures, interactive stepping and verbosity-tiered
//! reporting. Call ordering (`begin`, then items with periodic batches, then
//! `end`) is the driver's responsibility; each operation here enforces its
//! own behavior only.

use std::collections::BTreeMap;

use tracing::debug;

use super::console::{Console, Verbosity};
use crate::exchange::Message;
use crate::{Error, Result};

/// Run-scoped mapping from iteration index to error description, accumulated
/// under the collect-and-continue failure policy.
///
/// Keys are inserted in increasing iteration order, so ascending key order is
/// also insertion order.
pub type ErrorLedger = BTreeMap<u64, String>;

/// Capability interface for the four lifecycle callbacks.
///
/// `on_item` is the only mandatory operation; the boundary and batch hooks
/// default to no-ops. Failures are foreign by nature, so every hook reports
/// through [`anyhow::Result`].
pub trait Handler {
    fn on_begin(&mut self, _message: &Message) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_item(&mut self, message: &Message) -> anyhow::Result<()>;

    fn on_batch(&mut self, _message: &Message) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_end(&mut self, _message: &Message, _errors: &ErrorLedger) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Processor configuration, fixed at construction
#[derive(Debug, Clone)]
pub struct ProcessorOptions {
    batch_size: usize,
    step_by_step: bool,
    pause_on_error: bool,
}

impl ProcessorOptions {
    /// Create options with the given batch cadence.
    ///
    /// `batch_size` must be positive; the driver flushes after every
    /// `batch_size` processed items.
    pub fn new(batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::invalid_options("batch size must be greater than 0"));
        }

        Ok(Self {
            batch_size,
            step_by_step: false,
            pause_on_error: false,
        })
    }

    /// Pause for confirmation after each item except the last
    pub fn with_step_by_step(mut self) -> Self {
        self.step_by_step = true;
        self
    }

    /// Abort the run on the first item failure instead of collecting errors
    pub fn with_pause_on_error(mut self) -> Self {
        self.pause_on_error = true;
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

/// The pipeline state machine consuming the message stream.
///
/// Owns the error ledger and the console reporting sink for exactly one
/// import run; neither is shared across runs.
pub struct Processor<H: Handler, C: Console> {
    handler: H,
    console: C,
    options: ProcessorOptions,
    errors: ErrorLedger,
}

impl<H: Handler, C: Console> Processor<H, C> {
    pub fn new(handler: H, console: C, options: ProcessorOptions) -> Self {
        Self {
            handler,
            console,
            options,
            errors: ErrorLedger::new(),
        }
    }

    /// Open the run: size the progress indicator and invoke the begin hook.
    ///
    /// Failures propagate and abort the run.
    pub fn begin(&mut self, message: &Message) -> Result<()> {
        if self.console.verbosity() == Verbosity::Normal {
            self.console.progress_start(message.total_iteration());
        }

        self.handler
            .on_begin(message)
            .map_err(|source| Error::Handler {
                phase: "begin",
                source,
            })
    }

    /// Process one item message.
    ///
    /// With `pause_on_error` a callback failure is wrapped into
    /// [`Error::ItemHandling`] and returned immediately; otherwise the
    /// failure is recorded in the ledger under the message's iteration index
    /// and processing continues. A declined step-mode confirmation returns
    /// [`Error::ImportCancelled`].
    pub fn item(&mut self, message: &Message) -> Result<()> {
        if let Err(cause) = self.handler.on_item(message) {
            if self.options.pause_on_error {
                return Err(Error::ItemHandling {
                    exit_code: 1,
                    source: cause,
                });
            }

            debug!(
                "Recorded item failure at iteration {}: {}",
                message.current_iteration(),
                cause
            );
            self.errors
                .insert(message.current_iteration(), cause.to_string());
        }

        match self.console.verbosity() {
            Verbosity::Quiet => {}
            Verbosity::Normal => self.console.progress_advance(),
            Verbosity::Verbose | Verbosity::VeryVerbose | Verbosity::Debug => {
                self.console.comment(&format!(
                    "Row {}/{}",
                    message.current_iteration(),
                    message.total_iteration()
                ));
                let fields = message
                    .payload()
                    .map(|record| record.to_pairs())
                    .unwrap_or_default();
                self.console.field_list(&fields);
            }
        }

        if self.options.step_by_step && message.current_iteration() < message.total_iteration() {
            if !self.console.confirm("Continue?")? {
                self.console.error_block("Import cancelled");
                return Err(Error::ImportCancelled);
            }
        }

        Ok(())
    }

    /// Flush accumulated work through the batch hook.
    ///
    /// Batch units are atomic: failures get no pause/collect treatment and
    /// propagate to the caller.
    pub fn batch(&mut self, message: &Message) -> Result<()> {
        self.handler
            .on_batch(message)
            .map_err(|source| Error::Handler {
                phase: "batch",
                source,
            })
    }

    /// Close the run: finish the progress indicator, invoke the end hook
    /// with the accumulated ledger and render the consolidated error listing
    /// when any item failed.
    pub fn end(&mut self, message: &Message) -> Result<()> {
        if self.console.verbosity() == Verbosity::Normal {
            self.console.progress_finish();
        }

        self.handler
            .on_end(message, &self.errors)
            .map_err(|source| Error::Handler {
                phase: "end",
                source,
            })?;

        if !self.errors.is_empty() {
            self.console.error_block("Errors occurred during import:");
            let lines: Vec<String> = self
                .errors
                .iter()
                .map(|(index, description)| format!("Line #{}: {}", index, description))
                .collect();
            self.console.listing(&lines);
        }

        Ok(())
    }

    /// Configured batch cadence, exposed for the driver
    pub fn batch_size(&self) -> usize {
        self.options.batch_size()
    }

    /// Errors recorded so far under the collect-and-continue policy
    pub fn errors(&self) -> &ErrorLedger {
        &self.errors
    }

    /// Read access to the handler, mainly for drivers reporting handler state
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Read access to the reporting sink
    pub fn console(&self) -> &C {
        &self.console
    }
}
