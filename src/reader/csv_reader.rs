//! CSV record source implementation.
//!
//! Reads a delimited text file lazily, one record at a time, while exposing
//! an eagerly computed total count. The whole file is validated by a counting
//! pre-scan at construction so that iteration itself never fails: a reader
//! that opened successfully yields exactly `count()` records and then the
//! empty sentinel.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{Reader, Record};
use crate::{Error, Result};

/// Recognized options for [`CsvReader`]
#[derive(Debug, Clone)]
pub struct CsvOptions {
    delimiter: u8,
    no_headers: bool,
    denormalizable: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            no_headers: false,
            denormalizable: false,
        }
    }
}

impl CsvOptions {
    /// Set the field delimiter character
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Treat the first line as data; record keys become positional indices
    /// ("0", "1", ...) instead of header-derived names
    pub fn with_no_headers(mut self) -> Self {
        self.no_headers = true;
        self
    }

    /// Mark records as raw mappings that downstream code converts into typed
    /// values via [`Record::denormalize`]
    pub fn with_denormalization(mut self) -> Self {
        self.denormalizable = true;
        self
    }
}

/// Lazy CSV record source with an up-front record count
pub struct CsvReader {
    path: PathBuf,
    file_name: String,
    options: CsvOptions,
    headers: Vec<String>,
    rows: csv::StringRecordsIntoIter<File>,
    current: Record,
    index: u64,
    count: u64,
}

impl CsvReader {
    /// Open a CSV file and prime the reader on its first record.
    ///
    /// Fails with [`Error::ResourceNotFound`] when the file cannot be opened
    /// and with [`Error::MalformedRecord`] when the counting pre-scan hits a
    /// row the CSV parser rejects.
    pub fn open(path: impl Into<PathBuf>, options: CsvOptions) -> Result<Self> {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let (headers, count) = Self::scan(&path, &options)?;
        debug!("Counted {} records in {}", count, path.display());

        let file = File::open(&path).map_err(|source| Error::ResourceNotFound {
            path: path.clone(),
            source,
        })?;
        let rows = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(!options.no_headers)
            .from_reader(file)
            .into_records();

        let mut reader = Self {
            path,
            file_name,
            options,
            headers,
            rows,
            current: Record::empty(),
            index: 0,
            count,
        };
        reader.advance();
        Ok(reader)
    }

    /// Counting pre-scan: capture the header row and validate every record
    fn scan(path: &Path, options: &CsvOptions) -> Result<(Vec<String>, u64)> {
        let file = File::open(path).map_err(|source| Error::ResourceNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let mut scanner = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(!options.no_headers)
            .from_reader(file);

        let headers = if options.no_headers {
            Vec::new()
        } else {
            scanner.headers()?.iter().map(str::to_string).collect()
        };

        let mut count = 0u64;
        for row in scanner.records() {
            match row {
                Ok(_) => count += 1,
                Err(err) => {
                    let line = err.position().map(|p| p.line()).unwrap_or(count + 1);
                    return Err(Error::malformed_record(path, line, err.to_string()));
                }
            }
        }

        Ok((headers, count))
    }

    fn record_from_row(&self, row: &csv::StringRecord) -> Record {
        let fields = if self.options.no_headers {
            row.iter()
                .enumerate()
                .map(|(position, value)| (position.to_string(), value.to_string()))
                .collect()
        } else {
            self.headers
                .iter()
                .cloned()
                .zip(row.iter().map(str::to_string))
                .collect()
        };

        Record::from_pairs(fields)
    }
}

impl Reader for CsvReader {
    fn count(&self) -> u64 {
        self.count
    }

    fn index(&self) -> u64 {
        self.index
    }

    fn current(&self) -> &Record {
        &self.current
    }

    fn advance(&mut self) {
        if self.index > self.count {
            return;
        }

        self.index += 1;
        if self.index > self.count {
            self.current = Record::empty();
            return;
        }

        match self.rows.next() {
            Some(Ok(row)) => self.current = self.record_from_row(&row),
            Some(Err(err)) => {
                // The pre-scan validated the file; a decode failure here means
                // the resource changed underneath us. Treat as exhaustion.
                warn!("CSV row decode failed after pre-scan: {}", err);
                self.current = Record::empty();
                self.index = self.count + 1;
            }
            None => {
                warn!("CSV source ended before reaching the counted total");
                self.current = Record::empty();
                self.index = self.count + 1;
            }
        }
    }

    fn is_denormalizable(&self) -> bool {
        self.options.denormalizable
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn file_path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_with_headers() {
        let file = write_csv("author,title\nKim,Midnight Rain\nKnorr,Creepy Crawlies\n");
        let mut reader = CsvReader::open(file.path(), CsvOptions::default()).unwrap();

        assert_eq!(reader.count(), 2);
        assert_eq!(reader.index(), 1);
        assert_eq!(
            reader.current().keys().collect::<Vec<_>>(),
            vec!["author", "title"]
        );
        assert_eq!(reader.current().get("author"), Some("Kim"));

        reader.advance();
        assert_eq!(reader.index(), 2);
        assert_eq!(reader.current().get("title"), Some("Creepy Crawlies"));
    }

    #[test]
    fn test_exhaustion_yields_sentinel() {
        let file = write_csv("a,b\n1,2\n");
        let mut reader = CsvReader::open(file.path(), CsvOptions::default()).unwrap();

        reader.advance();
        assert_eq!(reader.index(), 2);
        assert!(reader.current().is_empty());

        // Advancing past the end stabilizes instead of failing
        reader.advance();
        reader.advance();
        assert_eq!(reader.index(), reader.count() + 1);
        assert!(reader.current().is_empty());
    }

    #[test]
    fn test_current_is_idempotent() {
        let file = write_csv("a,b\n1,2\n3,4\n");
        let reader = CsvReader::open(file.path(), CsvOptions::default()).unwrap();

        let first = reader.current().clone();
        assert_eq!(reader.current(), &first);
        assert_eq!(reader.current(), &first);
    }

    #[test]
    fn test_count_is_stable_across_iteration() {
        let file = write_csv("a\n1\n2\n3\n");
        let mut reader = CsvReader::open(file.path(), CsvOptions::default()).unwrap();

        let mut seen = 0;
        while reader.index() <= reader.count() {
            assert!(!reader.current().is_empty());
            seen += 1;
            reader.advance();
        }

        assert_eq!(seen, 3);
        assert_eq!(reader.count(), 3);
        assert_eq!(reader.index(), 4);
    }

    #[test]
    fn test_no_headers_uses_positional_keys() {
        let file = write_csv("Kim;Midnight Rain;Fantasy\n");
        let reader = CsvReader::open(
            file.path(),
            CsvOptions::default().with_delimiter(b';').with_no_headers(),
        )
        .unwrap();

        assert_eq!(reader.count(), 1);
        assert_eq!(
            reader.current().keys().collect::<Vec<_>>(),
            vec!["0", "1", "2"]
        );
        assert_eq!(reader.current().get("1"), Some("Midnight Rain"));
    }

    #[test]
    fn test_custom_delimiter() {
        let file = write_csv("author;title\nKim;Midnight Rain\n");
        let reader =
            CsvReader::open(file.path(), CsvOptions::default().with_delimiter(b';')).unwrap();

        assert_eq!(reader.current().get("title"), Some("Midnight Rain"));
    }

    #[test]
    fn test_quoted_field_with_embedded_delimiter() {
        let file = write_csv("author,title\n\"Ralls, Kim\",Midnight Rain\n");
        let reader = CsvReader::open(file.path(), CsvOptions::default()).unwrap();

        assert_eq!(reader.current().get("author"), Some("Ralls, Kim"));
    }

    #[test]
    fn test_missing_file_fails_at_construction() {
        let result = CsvReader::open("/nonexistent/books.csv", CsvOptions::default());
        assert!(matches!(result, Err(Error::ResourceNotFound { .. })));
    }

    #[test]
    fn test_header_only_file_is_exhausted_immediately() {
        let file = write_csv("author,title\n");
        let reader = CsvReader::open(file.path(), CsvOptions::default()).unwrap();

        assert_eq!(reader.count(), 0);
        assert_eq!(reader.index(), 1);
        assert!(reader.current().is_empty());
    }

    #[test]
    fn test_ragged_row_is_rejected_by_pre_scan() {
        let file = write_csv("a,b\n1,2\n3\n");
        let result = CsvReader::open(file.path(), CsvOptions::default());

        assert!(matches!(result, Err(Error::MalformedRecord { .. })));
    }

    #[test]
    fn test_denormalizable_flag() {
        let file = write_csv("a\n1\n");
        let reader = CsvReader::open(
            file.path(),
            CsvOptions::default().with_denormalization(),
        )
        .unwrap();

        assert!(reader.is_denormalizable());
        assert_eq!(reader.file_path(), file.path());
        assert!(!reader.file_name().is_empty());
    }
}
