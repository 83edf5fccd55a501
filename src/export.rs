//! CSV export of labeled records.

use std::io::Write;

use crate::session::ExportEntry;

/// Serialize an export view to CSV bytes.
///
/// Two columns: the original text under its source column name, and the
/// assigned label. Unset labels pass through as empty fields.
pub fn to_csv(view: &[ExportEntry], text_column: &str) -> Vec<u8> {
    let mut output = Vec::new();
    writeln!(output, "{},Label", escape_csv(text_column)).ok();

    for entry in view {
        writeln!(
            output,
            "{},{}",
            escape_csv(&entry.text),
            entry.label.map(|l| l.as_str()).unwrap_or("")
        )
        .ok();
    }

    output
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
