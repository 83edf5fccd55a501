//! CSV reader for labeling input.
//!
//! Handles quoted fields with embedded commas, quotes, and newlines, plus
//! CRLF line endings. The first row is the header; the text column is found
//! by case-insensitive name.

use thiserror::Error;

use crate::models::Record;

/// Default name of the text column.
pub const DEFAULT_TEXT_COLUMN: &str = "Content";

/// Errors from CSV ingestion.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file is empty")]
    EmptyFile,

    #[error("text column '{0}' not found in header")]
    MissingColumn(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse CSV bytes into rows of fields.
///
/// A quoted field runs to its closing quote, so delimiters and line breaks
/// inside quotes are literal; `""` inside quotes is an escaped quote. Blank
/// rows are skipped.
pub fn parse_csv(content: &[u8]) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = Vec::new();
    let mut in_quotes = false;
    let mut i = 0;

    while i < content.len() {
        let b = content[i];
        if in_quotes {
            if b == b'"' {
                // Escaped quote or closing quote
                if content.get(i + 1) == Some(&b'"') {
                    field.push(b'"');
                    i += 2;
                    continue;
                }
                in_quotes = false;
            } else {
                field.push(b);
            }
            i += 1;
            continue;
        }

        match b {
            b'"' => in_quotes = true,
            b',' => {
                row.push(String::from_utf8_lossy(&field).to_string());
                field.clear();
            }
            b'\n' => {
                row.push(String::from_utf8_lossy(&field).to_string());
                field.clear();
                push_row(&mut rows, &mut row);
            }
            b'\r' => {
                // CRLF handled at the \n; bare \r inside a field is dropped
            }
            _ => field.push(b),
        }
        i += 1;
    }

    // Final row without trailing newline
    if !field.is_empty() || !row.is_empty() {
        row.push(String::from_utf8_lossy(&field).to_string());
        push_row(&mut rows, &mut row);
    }

    rows
}

fn push_row(rows: &mut Vec<Vec<String>>, row: &mut Vec<String>) {
    let blank = row.iter().all(|f| f.trim().is_empty());
    if !blank {
        rows.push(std::mem::take(row));
    } else {
        row.clear();
    }
}

/// Load records from CSV bytes, taking text from the named column.
///
/// Rows shorter than the header are treated as having an empty text cell; an
/// empty cell still yields a record, since positions must stay aligned with
/// the source rows.
pub fn load_records(content: &[u8], text_column: &str) -> Result<Vec<Record>, IngestError> {
    let rows = parse_csv(content);
    let mut iter = rows.into_iter();

    let header = iter.next().ok_or(IngestError::EmptyFile)?;
    let column_idx = header
        .iter()
        .position(|name| name.trim().eq_ignore_ascii_case(text_column.trim()))
        .ok_or_else(|| IngestError::MissingColumn(text_column.to_string()))?;

    let records: Vec<Record> = iter
        .enumerate()
        .map(|(position, row)| {
            let text = row.get(column_idx).cloned().unwrap_or_default();
            Record::new(position, text)
        })
        .collect();

    tracing::debug!(records = records.len(), column = text_column, "loaded CSV");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_rows() {
        let records = load_records(b"Content\nfirst\nsecond\n", "Content").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], Record::new(0, "first"));
        assert_eq!(records[1], Record::new(1, "second"));
    }

    #[test]
    fn test_column_selected_by_name() {
        let csv = b"Id,Content,Source\n1,hello,web\n2,world,mail\n";
        let records = load_records(csv, "Content").unwrap();
        assert_eq!(records[0].text, "hello");
        assert_eq!(records[1].text, "world");
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let records = load_records(b"content\nrow\n", "Content").unwrap();
        assert_eq!(records[0].text, "row");
    }

    #[test]
    fn test_missing_column() {
        let err = load_records(b"Title\nrow\n", "Content").unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn(ref c) if c == "Content"));
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(
            load_records(b"", "Content"),
            Err(IngestError::EmptyFile)
        ));
        // Header-only input parses to zero records, not an error
        let records = load_records(b"Content\n", "Content").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_quoted_fields() {
        let csv = b"Content,Note\n\"a, with comma\",x\n\"he said \"\"hi\"\"\",y\n";
        let records = load_records(csv, "Content").unwrap();
        assert_eq!(records[0].text, "a, with comma");
        assert_eq!(records[1].text, "he said \"hi\"");
    }

    #[test]
    fn test_quoted_newline_stays_in_field() {
        let csv = b"Content\n\"line one\nline two\"\nnext\n";
        let records = load_records(csv, "Content").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "line one\nline two");
        assert_eq!(records[1].text, "next");
    }

    #[test]
    fn test_crlf_endings() {
        let records = load_records(b"Content\r\nfirst\r\nsecond\r\n", "Content").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "first");
        assert_eq!(records[1].text, "second");
    }

    #[test]
    fn test_short_row_yields_empty_text() {
        let csv = b"Id,Content\n1,present\n2\n3,after\n";
        let records = load_records(csv, "Content").unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].text, "");
        assert_eq!(records[2], Record::new(2, "after"));
    }

    #[test]
    fn test_no_trailing_newline() {
        let records = load_records(b"Content\nlast row", "Content").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "last row");
    }

    #[test]
    fn test_blank_rows_skipped() {
        let records = load_records(b"Content\nfirst\n\n   \nsecond\n", "Content").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].text, "second");
    }
}
