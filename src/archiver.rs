use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::WriteError;
use crate::models::ProductRecord;

pub const CSV_HEADER: [&str; 5] = ["title", "href", "price", "detail_price", "h1"];

/// Byte-order mark so spreadsheet tools pick UTF-8 for Arabic titles.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes records to `path` as BOM-prefixed UTF-8 CSV, creating parent
/// directories as needed. The header row is always written.
pub fn save_to_csv(products: &[ProductRecord], path: &Path) -> Result<(), WriteError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(path).map_err(|source| WriteError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    out.write_all(UTF8_BOM)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(out);
    writer.write_record(CSV_HEADER)?;
    for product in products {
        writer.serialize(product)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(path: &Path) -> String {
        String::from_utf8(fs::read(path).unwrap()).unwrap()
    }

    #[test]
    fn empty_set_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        save_to_csv(&[], &path).unwrap();
        assert_eq!(read(&path), "\u{feff}title,href,price,detail_price,h1\r\n");
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Desktop").join("nested").join("out.csv");
        save_to_csv(&[ProductRecord::partial("t", "https://x/1", "5")], &path).unwrap();
        assert_eq!(
            read(&path),
            "\u{feff}title,href,price,detail_price,h1\r\nt,https://x/1,5,,\r\n"
        );
    }

    #[test]
    fn quotes_fields_with_delimiters_and_quotes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let product = ProductRecord {
            title: "Split, 1.5 \"HP\"".into(),
            href: "https://x/1".into(),
            price: "1".into(),
            detail_price: "2".into(),
            h1: "line\nbreak".into(),
        };
        save_to_csv(&[product], &path).unwrap();
        let text = read(&path);
        assert!(text.contains("\"Split, 1.5 \"\"HP\"\"\""));
        assert!(text.contains("\"line\nbreak\""));
    }

    #[test]
    fn unwritable_destination_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let err = save_to_csv(&[], &blocker.join("out.csv")).unwrap_err();
        assert!(matches!(err, WriteError::CreateDir { .. }));
    }
}
