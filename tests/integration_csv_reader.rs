//! Integration tests for the CSV record source against on-disk fixtures.

use std::path::{Path, PathBuf};

use data_importer::reader::{CsvOptions, CsvReader, Reader};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_read_csv_file_with_header() {
    let path = fixture("books_with_headers.csv");
    let mut reader =
        CsvReader::open(&path, CsvOptions::default().with_delimiter(b';')).unwrap();

    // denormalization
    assert!(!reader.is_denormalizable());

    // file provenance
    assert_eq!(reader.file_name(), "books_with_headers.csv");
    assert_eq!(reader.file_path(), path.as_path());

    // count
    assert_eq!(reader.count(), 2);

    // index
    assert_eq!(reader.index(), 1);

    // headers
    assert_eq!(
        reader.current().keys().collect::<Vec<_>>(),
        vec!["author", "title", "genre", "price", "description"]
    );
    for field in ["author", "title", "genre", "price", "description"] {
        assert!(reader.current().get(field).is_some());
        assert!(!reader.current().get(field).unwrap().is_empty());
    }

    // second line
    reader.advance();
    assert_eq!(reader.index(), 2);
    assert_eq!(reader.current().get("author"), Some("Ralls, Kim"));
    assert_eq!(reader.current().get("title"), Some("Midnight Rain"));
    assert_eq!(reader.current().get("genre"), Some("Fantasy"));
    assert_eq!(reader.current().get("price"), Some("5.95"));
    assert_eq!(
        reader.current().get("description"),
        Some(
            "A former architect battles corporate zombies, an evil sorceress, \
             and her own childhood to become queen of the world."
        )
    );

    // end of file
    reader.advance();
    assert!(reader.current().is_empty());
    assert_eq!(reader.index(), 3);
}

#[test]
fn test_read_csv_without_header() {
    let path = fixture("books_without_headers.csv");
    let mut reader = CsvReader::open(
        &path,
        CsvOptions::default().with_delimiter(b';').with_no_headers(),
    )
    .unwrap();

    // denormalization
    assert!(!reader.is_denormalizable());

    // count
    assert_eq!(reader.count(), 2);

    // index
    assert_eq!(reader.index(), 1);

    // positional keys
    assert_eq!(
        reader.current().keys().collect::<Vec<_>>(),
        vec!["0", "1", "2", "3", "4"]
    );

    // content
    reader.advance();
    assert_eq!(reader.index(), 2);
    assert_eq!(reader.current().get("0"), Some("Ralls, Kim"));
    assert_eq!(reader.current().get("1"), Some("Midnight Rain"));
    assert_eq!(reader.current().get("2"), Some("Fantasy"));
    assert_eq!(reader.current().get("3"), Some("5.95"));

    // end of file
    reader.advance();
    assert!(reader.current().is_empty());
}
