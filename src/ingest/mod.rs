//! CSV ingestion: turning an uploaded file into an ordered record set.

mod csv;

pub use csv::{load_records, parse_csv, IngestError, DEFAULT_TEXT_COLUMN};
