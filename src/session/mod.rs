//! Labeling sessions: the walk over records and the accumulated labels.
//!
//! A session is a value, rebuilt from its persisted snapshot on every
//! interaction and written back after every mutation. The web handlers never
//! keep one alive across requests.

mod store;
mod walk;

pub use store::{source_hash, SessionStore, StoreError, StoredSession};
pub use walk::{ExportEntry, ExportView, LabelingSession, SessionError, SessionSnapshot};
