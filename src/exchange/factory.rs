//! Message construction from a record source.

use std::path::PathBuf;

use super::Message;
use crate::reader::{Reader, Record};

/// Builds messages by stamping the source position onto a record.
///
/// Pure functions: position and provenance are read from the reader at call
/// time, so a message keeps the index it was created at regardless of how the
/// reader advances afterwards.
pub struct MessageFactory;

impl MessageFactory {
    /// Create an item-phase message carrying `payload`
    pub fn create(
        reader: &dyn Reader,
        payload: Record,
        archive_path: Option<PathBuf>,
    ) -> Message {
        Message::new(
            reader.file_name().to_string(),
            reader.file_path().to_path_buf(),
            reader.index(),
            reader.count(),
            Some(payload),
            archive_path,
        )
    }

    /// Create a begin/end boundary message with no payload
    pub fn boundary(reader: &dyn Reader, archive_path: Option<PathBuf>) -> Message {
        Message::new(
            reader.file_name().to_string(),
            reader.file_path().to_path_buf(),
            reader.index(),
            reader.count(),
            None,
            archive_path,
        )
    }
}
