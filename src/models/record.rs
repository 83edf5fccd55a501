//! Records: the rows being labeled.

use serde::{Deserialize, Serialize};

/// One text row from the source file.
///
/// The position is the row's 0-based index in the original file order and
/// never changes; label slots and export rows are keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Stable 0-based position in the source order.
    pub position: usize,
    /// Text content of the row.
    pub text: String,
}

impl Record {
    /// Create a record at a given position.
    pub fn new(position: usize, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
        }
    }
}
