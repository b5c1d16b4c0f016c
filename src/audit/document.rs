// src/audit/document.rs
use csv::ReaderBuilder;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use super::shape::{self, LengthExtremes};
use super::{AuditError, FIRST_DATA_ROW};

/// A CSV file read once into memory.
#[derive(Debug, Clone)]
pub struct CsvDocument {
    /// Where the document was read from, used in error messages and reports.
    pub path: PathBuf,
    /// Row 0 of the file. Names are positional and may repeat.
    pub header: Vec<String>,
    /// Every record after the header, each with however many fields it had.
    pub rows: Vec<Vec<String>>,
}

impl CsvDocument {
    /// Read and parse `path` in one buffered pass.
    ///
    /// Fails with `FileNotFound` for a missing path, `Decode` for bytes that
    /// are not UTF-8, `MalformedCsv` for an unterminated quoted field and
    /// `MissingHeader` for an empty file.
    #[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AuditError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => AuditError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => AuditError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        debug!(bytes = bytes.len(), "read file");

        let text = String::from_utf8(bytes).map_err(|e| AuditError::Decode {
            path: path.to_path_buf(),
            offset: e.utf8_error().valid_up_to(),
        })?;

        let doc = Self::parse(path, &text)?;
        info!(
            header_len = doc.header_len(),
            rows = doc.rows.len(),
            "loaded csv"
        );
        Ok(doc)
    }

    /// Parse already-decoded CSV text. `path` only labels errors.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Result<Self, AuditError> {
        let path = path.into();

        let layout = scan_layout(text);
        if let Some(line) = layout.open_quote_line {
            return Err(AuditError::MalformedCsv {
                path,
                reason: format!("quoted field opened on line {} is never closed", line),
            });
        }

        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // short and long rows are what we are here to find
            .from_reader(text.as_bytes());

        // The reader skips blank lines; put them back as empty rows so file
        // row numbers stay aligned and a zero-length row can be reported.
        let mut blanks = layout.blank_slots.into_iter().peekable();
        let mut records = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| AuditError::MalformedCsv {
                path: path.clone(),
                reason: format!("record {}: {}", idx + 1, e),
            })?;
            while blanks.next_if(|&slot| slot <= idx).is_some() {
                records.push(Vec::new());
            }
            records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }
        records.extend(blanks.map(|_| Vec::new()));

        let mut records = records.into_iter();
        let header = records
            .next()
            .ok_or_else(|| AuditError::MissingHeader { path: path.clone() })?;

        Ok(Self {
            path,
            header,
            rows: records.collect(),
        })
    }

    pub fn header_len(&self) -> usize {
        self.header.len()
    }

    /// Data row by file row number (header = 1, first data row = 2).
    pub fn row(&self, file_row: usize) -> Option<&[String]> {
        file_row
            .checked_sub(FIRST_DATA_ROW)
            .and_then(|idx| self.rows.get(idx))
            .map(Vec::as_slice)
    }

    /// Data rows paired with their file row numbers.
    pub fn numbered_rows(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.rows
            .iter()
            .enumerate()
            .map(|(idx, row)| (idx + FIRST_DATA_ROW, row.as_slice()))
    }

    /// Rows carrying values past the last header column.
    pub fn rows_with_extras(&self) -> impl Iterator<Item = (usize, &[String])> {
        let header_len = self.header_len();
        self.numbered_rows()
            .filter(move |(_, row)| row.len() > header_len)
    }

    pub fn length_extremes(&self) -> Option<LengthExtremes> {
        shape::length_extremes(&self.rows)
    }

    /// True when every data row is exactly as long as the header.
    pub fn is_well_formed(&self) -> bool {
        self.rows.iter().all(|row| row.len() == self.header.len())
    }
}

/// Record layout the `csv` reader does not expose.
struct Layout {
    /// Line (1-based) on which a quoted field opens without ever closing.
    open_quote_line: Option<usize>,
    /// For each blank line, how many non-blank records precede it.
    blank_slots: Vec<usize>,
}

/// Quotes only open a field when they are its first character; inside a
/// quoted field `""` is an escaped quote. `\r`, `\n` and `\r\n` end a record.
fn scan_layout(text: &str) -> Layout {
    let mut line = 1;
    let mut open_since: Option<usize> = None;
    let mut at_field_start = true;
    let mut line_empty = true;
    let mut records = 0;
    let mut blank_slots = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if open_since.is_some() {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                }
                '"' => open_since = None,
                '\n' => line += 1,
                _ => {}
            }
            continue;
        }

        match c {
            '"' if at_field_start => {
                open_since = Some(line);
                at_field_start = false;
                line_empty = false;
            }
            ',' => {
                at_field_start = true;
                line_empty = false;
            }
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                if line_empty {
                    blank_slots.push(records);
                } else {
                    records += 1;
                }
                line += 1;
                at_field_start = true;
                line_empty = true;
            }
            _ => {
                at_field_start = false;
                line_empty = false;
            }
        }
    }

    Layout {
        open_quote_line: open_since,
        blank_slots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parse_keeps_ragged_rows() -> Result<()> {
        let doc = CsvDocument::parse("mem.csv", "a,b,c\n1,2,3\n4,5\n6,7,8,9\n")?;
        assert_eq!(doc.header, vec!["a", "b", "c"]);
        let lens: Vec<usize> = doc.rows.iter().map(Vec::len).collect();
        assert_eq!(lens, vec![3, 2, 4]);
        assert!(!doc.is_well_formed());
        Ok(())
    }

    #[test]
    fn quoted_fields_keep_commas_and_newlines() -> Result<()> {
        let doc = CsvDocument::parse("mem.csv", "name,note\r\nx,\"a, \"\"b\"\"\nc\"\r\n")?;
        assert_eq!(doc.rows, vec![vec!["x".to_string(), "a, \"b\"\nc".to_string()]]);
        assert!(doc.is_well_formed());
        Ok(())
    }

    #[test]
    fn row_uses_file_row_numbers() -> Result<()> {
        let doc = CsvDocument::parse("mem.csv", "h\nfirst\nsecond\n")?;
        assert_eq!(doc.row(1), None);
        assert_eq!(doc.row(2), Some(&["first".to_string()][..]));
        assert_eq!(doc.row(3), Some(&["second".to_string()][..]));
        assert_eq!(doc.row(4), None);
        Ok(())
    }

    #[test]
    fn rows_with_extras_reports_file_rows() -> Result<()> {
        let doc = CsvDocument::parse("mem.csv", "a,b\n1,2\n1,2,3\n1\n1,2,3,4\n")?;
        let found: Vec<(usize, usize)> = doc
            .rows_with_extras()
            .map(|(n, row)| (n, row.len()))
            .collect();
        assert_eq!(found, vec![(3, 3), (5, 4)]);
        Ok(())
    }

    #[test]
    fn unterminated_quote_is_malformed() {
        let err = CsvDocument::parse("mem.csv", "a,b\n1,\"open\n2,3\n").unwrap_err();
        match err {
            AuditError::MalformedCsv { reason, .. } => assert!(reason.contains("line 2")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn stray_quote_inside_field_is_literal() -> Result<()> {
        let doc = CsvDocument::parse("mem.csv", "a,b\n1,in\"ch\n")?;
        assert_eq!(doc.rows[0][1], "in\"ch");
        Ok(())
    }

    #[test]
    fn blank_lines_become_empty_rows() -> Result<()> {
        let doc = CsvDocument::parse("mem.csv", "a,b\n1,2\n\n3,4,5\n")?;
        let lens: Vec<usize> = doc.rows.iter().map(Vec::len).collect();
        assert_eq!(lens, vec![2, 0, 3]);
        assert_eq!(doc.row(3), Some(&[][..]));

        let extras: Vec<usize> = doc.rows_with_extras().map(|(n, _)| n).collect();
        assert_eq!(extras, vec![4]);

        let ext = doc.length_extremes().unwrap();
        assert_eq!((ext.min_len, ext.min_rows), (0, vec![3]));
        assert_eq!((ext.max_len, ext.max_rows), (3, vec![4]));
        Ok(())
    }

    #[test]
    fn trailing_and_crlf_blank_lines_are_kept() -> Result<()> {
        let doc = CsvDocument::parse("mem.csv", "a\r\n\r\n1\r\n\n")?;
        let lens: Vec<usize> = doc.rows.iter().map(Vec::len).collect();
        assert_eq!(lens, vec![0, 1, 0]);
        Ok(())
    }

    #[test]
    fn leading_blank_line_is_an_empty_header() -> Result<()> {
        let doc = CsvDocument::parse("mem.csv", "\na,b\n")?;
        assert!(doc.header.is_empty());
        assert_eq!(doc.rows, vec![vec!["a".to_string(), "b".to_string()]]);
        Ok(())
    }

    #[test]
    fn blank_line_inside_quotes_is_field_text() -> Result<()> {
        let doc = CsvDocument::parse("mem.csv", "a,b\n1,\"x\n\ny\"\n2,3\n")?;
        assert_eq!(doc.rows.len(), 2);
        assert_eq!(doc.rows[0][1], "x\n\ny");
        Ok(())
    }

    #[test]
    fn empty_file_has_no_header() {
        let err = CsvDocument::parse("mem.csv", "").unwrap_err();
        assert!(matches!(err, AuditError::MissingHeader { .. }));
    }

    #[test]
    fn load_missing_file() {
        let err = CsvDocument::load("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, AuditError::FileNotFound { .. }));
    }

    #[test]
    fn load_rejects_invalid_utf8() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(b"a,b\n1,\xff\xfe\n")?;
        let err = CsvDocument::load(tmp.path()).unwrap_err();
        match err {
            AuditError::Decode { offset, .. } => assert_eq!(offset, 6),
            other => panic!("unexpected error: {other:?}"),
        }
        Ok(())
    }
}
