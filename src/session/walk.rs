//! The labeling walk over an ordered record set.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Label, LabelingOptions, Record};

/// Errors from session construction and labeling.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot start a labeling session with no records")]
    EmptyInput,

    #[error("record position {position} out of range (0..{len})")]
    OutOfRange { position: usize, len: usize },

    #[error("label '{0}' is not offered by this session")]
    LabelNotOffered(&'static str),

    #[error("snapshot does not match record set: {0}")]
    SnapshotMismatch(String),
}

/// Serializable session state: everything that survives between interactions.
///
/// The record set itself is stored alongside the snapshot but never mutated,
/// so resuming only needs to validate that the two still line up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Position of the record currently presented.
    pub cursor: usize,
    /// One slot per record, in source order. `None` until labeled.
    pub labels: Vec<Option<Label>>,
}

/// One row of an export view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportEntry {
    pub position: usize,
    pub text: String,
    pub label: Option<Label>,
}

/// Derived read-only pairing of record text with its current label.
pub type ExportView = Vec<ExportEntry>;

/// A labeling walk: ordered records, a cursor, and one label slot per record.
///
/// Invariants: exactly one slot per record, in source order, and
/// `cursor <= records.len()` at all times. `cursor == len` means the walk is
/// complete.
#[derive(Debug, Clone)]
pub struct LabelingSession {
    records: Vec<Record>,
    cursor: usize,
    labels: Vec<Option<Label>>,
    options: LabelingOptions,
}

impl LabelingSession {
    /// Start a fresh session: cursor at 0, every slot unset.
    pub fn new(records: Vec<Record>, options: LabelingOptions) -> Result<Self, SessionError> {
        if records.is_empty() {
            return Err(SessionError::EmptyInput);
        }
        let labels = vec![None; records.len()];
        Ok(Self {
            records,
            cursor: 0,
            labels,
            options,
        })
    }

    /// Rebuild a session from a persisted snapshot.
    pub fn resume(
        records: Vec<Record>,
        snapshot: SessionSnapshot,
        options: LabelingOptions,
    ) -> Result<Self, SessionError> {
        if records.is_empty() {
            return Err(SessionError::EmptyInput);
        }
        if snapshot.labels.len() != records.len() {
            return Err(SessionError::SnapshotMismatch(format!(
                "{} label slots for {} records",
                snapshot.labels.len(),
                records.len()
            )));
        }
        if snapshot.cursor > records.len() {
            return Err(SessionError::SnapshotMismatch(format!(
                "cursor {} past end of {} records",
                snapshot.cursor,
                records.len()
            )));
        }
        Ok(Self {
            records,
            cursor: snapshot.cursor,
            labels: snapshot.labels,
            options,
        })
    }

    /// Capture the persistable state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            cursor: self.cursor,
            labels: self.labels.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn options(&self) -> LabelingOptions {
        self.options
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records with a label assigned.
    pub fn labeled_count(&self) -> usize {
        self.labels.iter().filter(|slot| slot.is_some()).count()
    }

    /// The record under the cursor, or `None` once the walk is done.
    ///
    /// `None` is the end-of-sequence signal, not a failure; the UI switches
    /// to its completion view on it.
    pub fn current(&self) -> Option<&Record> {
        self.records.get(self.cursor)
    }

    /// Stored label at a position, if any.
    pub fn label_at(&self, position: usize) -> Option<Label> {
        self.labels.get(position).copied().flatten()
    }

    /// Assign a label. Does not move the cursor.
    pub fn label(&mut self, position: usize, value: Label) -> Result<(), SessionError> {
        if !self.options.label_set.contains(value) {
            return Err(SessionError::LabelNotOffered(value.as_str()));
        }
        let len = self.records.len();
        let slot = self
            .labels
            .get_mut(position)
            .ok_or(SessionError::OutOfRange { position, len })?;
        *slot = Some(value);
        Ok(())
    }

    /// Step forward, saturating at the end. A no-op once complete.
    pub fn advance(&mut self) {
        if self.cursor < self.records.len() {
            self.cursor += 1;
        }
    }

    /// Step back one position, saturating at 0.
    ///
    /// The previous record is re-exposed for labeling; its stored label is
    /// kept until the user overwrites it.
    pub fn retreat(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// True once every record has been walked past.
    pub fn is_complete(&self) -> bool {
        self.cursor == self.records.len()
    }

    /// Export view over the labeled-so-far prefix `[0, cursor)`.
    pub fn export_partial(&self) -> ExportView {
        self.export_range(self.cursor)
    }

    /// Export view over every record, unset labels included.
    pub fn export_full(&self) -> ExportView {
        self.export_range(self.records.len())
    }

    fn export_range(&self, end: usize) -> ExportView {
        self.records[..end]
            .iter()
            .map(|record| ExportEntry {
                position: record.position,
                text: record.text.clone(),
                label: self.labels[record.position],
            })
            .collect()
    }
}
