//! Error handling for import pipeline operations.
//!
//! Provides error types with context for record source construction,
//! per-item handler failures and interactive cancellation.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Resource not found: {}", path.display())]
    ResourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record in file {} at line {line}: {reason}", path.display())]
    MalformedRecord {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("Error during item handling")]
    ItemHandling {
        /// Process exit code hint for the CLI layer.
        exit_code: i32,
        #[source]
        source: anyhow::Error,
    },

    #[error("Error during {phase} handling")]
    Handler {
        phase: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// Deliberate user abort from the step-by-step confirmation prompt.
    ///
    /// A distinct terminal outcome, never recorded in the error ledger.
    #[error("Import cancelled")]
    ImportCancelled,

    #[error("Cannot denormalize record: {reason}")]
    Denormalization {
        reason: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },
}

impl Error {
    /// Create an invalid options error
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }

    /// Create a malformed record error
    pub fn malformed_record(
        path: impl Into<PathBuf>,
        line: u64,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
