//! Reporting sink abstraction consumed by the processor.
//!
//! The processor decides *when* to report and with what data; how the output
//! is rendered (progress bar widget, colors, prompt handling) is left to the
//! implementation behind this trait.

use crate::Result;

/// Output verbosity tiers, ordered from most to least terse.
///
/// Tier checks are comparisons on this enum, never on raw numeric settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Errors only; no progress indicator
    Quiet,
    /// Count-based progress indicator
    Normal,
    /// Per-row trace with flattened record fields
    Verbose,
    VeryVerbose,
    Debug,
}

impl Verbosity {
    /// Map the CLI `-v` count and `-q` flag onto a tier
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else {
            match verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                2 => Verbosity::VeryVerbose,
                _ => Verbosity::Debug,
            }
        }
    }
}

/// Console reporting sink used by the processor lifecycle.
pub trait Console {
    /// Active verbosity tier
    fn verbosity(&self) -> Verbosity;

    /// Start a count-based progress indicator sized to `total`
    fn progress_start(&mut self, total: u64);

    /// Advance the progress indicator by one
    fn progress_advance(&mut self);

    /// Complete the progress indicator
    fn progress_finish(&mut self);

    /// Emit an informational comment line
    fn comment(&mut self, text: &str);

    /// Render a structured key/value listing of record fields
    fn field_list(&mut self, fields: &[(String, String)]);

    /// Ask an interactive yes/no question; blocks until answered
    fn confirm(&mut self, question: &str) -> Result<bool>;

    /// Render a highlighted error banner
    fn error_block(&mut self, message: &str);

    /// Render a bulleted listing
    fn listing(&mut self, items: &[String]);
}
