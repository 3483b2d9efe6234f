//! Positional message envelope passed through the processor lifecycle.

use std::path::{Path, PathBuf};

use crate::reader::Record;

/// Immutable envelope pairing a record with positional and provenance
/// metadata.
///
/// One message is created per record handed to the item phase, plus one for
/// each of the begin/end boundary calls. Boundary messages carry the boundary
/// position and no payload. Messages are never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    file_name: String,
    file_path: PathBuf,
    current_iteration: u64,
    total_iteration: u64,
    payload: Option<Record>,
    archive_path: Option<PathBuf>,
}

impl Message {
    pub fn new(
        file_name: String,
        file_path: PathBuf,
        current_iteration: u64,
        total_iteration: u64,
        payload: Option<Record>,
        archive_path: Option<PathBuf>,
    ) -> Self {
        Self {
            file_name,
            file_path,
            current_iteration,
            total_iteration,
            payload,
            archive_path,
        }
    }

    /// Name of the source file
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Full path of the source file
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// 1-based iteration index this message was created at
    pub fn current_iteration(&self) -> u64 {
        self.current_iteration
    }

    /// Total iteration count of the source
    pub fn total_iteration(&self) -> u64 {
        self.total_iteration
    }

    /// The record payload; absent on begin/end boundary messages
    pub fn payload(&self) -> Option<&Record> {
        self.payload.as_ref()
    }

    /// Path of the archive the source file was extracted from, when the
    /// source is an archive member
    pub fn archive_path(&self) -> Option<&Path> {
        self.archive_path.as_deref()
    }

    /// Whether this message sits on the first iteration
    pub fn is_first(&self) -> bool {
        self.current_iteration == 1
    }

    /// Whether this message sits on the last iteration
    pub fn is_last(&self) -> bool {
        self.current_iteration == self.total_iteration
    }
}
