//! Import command implementation.
//!
//! Wires the CSV reader, the terminal console and the JSON-lines handler
//! into an importer run, and maps CLI flags onto the library configuration.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::Context;
use tracing::{debug, info, warn};

use super::args::{Args, Commands, ImportArgs};
use crate::exchange::Message;
use crate::importer::{ImportStats, Importer};
use crate::processor::{ErrorLedger, Handler, Processor, ProcessorOptions, TermConsole};
use crate::reader::CsvReader;
use crate::{Error, Result};

/// Handler emitting one JSON object per imported record.
///
/// Records are buffered as they arrive and written out on every batch flush,
/// so a batch is the unit of output durability.
pub struct JsonLinesHandler<W: Write> {
    out: W,
    buffer: Vec<String>,
}

impl<W: Write> JsonLinesHandler<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buffer: Vec::new(),
        }
    }

    fn flush_buffer(&mut self) -> anyhow::Result<()> {
        for line in self.buffer.drain(..) {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Handler for JsonLinesHandler<W> {
    fn on_item(&mut self, message: &Message) -> anyhow::Result<()> {
        let record = message
            .payload()
            .context("item message carries no record payload")?;
        self.buffer.push(serde_json::to_string(record)?);
        Ok(())
    }

    fn on_batch(&mut self, message: &Message) -> anyhow::Result<()> {
        debug!(
            "Writing batch of {} records at row {}",
            self.buffer.len(),
            message.current_iteration()
        );
        self.flush_buffer()
    }

    fn on_end(&mut self, _message: &Message, errors: &ErrorLedger) -> anyhow::Result<()> {
        // The driver flushes on batch cadence; anything a foreign driver left
        // behind lands here
        self.flush_buffer()?;

        if !errors.is_empty() {
            warn!("{} records failed during import", errors.len());
        }
        Ok(())
    }
}

/// Set up structured logging for the import command
pub fn setup_logging(args: &ImportArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("data_importer={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Entry point for a parsed command line
pub fn run(args: Args) -> Result<ImportStats> {
    match args.command {
        Some(Commands::Import(import_args)) => run_import(import_args),
        None => Err(Error::invalid_options(
            "No command specified; see --help".to_string(),
        )),
    }
}

/// Run the import command: validate arguments, build the pipeline and drive
/// it to completion
pub fn run_import(args: ImportArgs) -> Result<ImportStats> {
    setup_logging(&args)?;
    args.validate()?;

    info!("Importing {}", args.input_path.display());

    let reader = CsvReader::open(&args.input_path, args.csv_options())?;
    let console = TermConsole::new(args.verbosity());

    let mut options = ProcessorOptions::new(args.batch_size)?;
    if args.step {
        options = options.with_step_by_step();
    }
    if args.pause_on_error {
        options = options.with_pause_on_error();
    }

    let out: Box<dyn Write> = match &args.output_path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout()),
    };

    let processor = Processor::new(JsonLinesHandler::new(out), console, options);
    let mut importer = Importer::new(Box::new(reader), processor);

    importer.run()
}
