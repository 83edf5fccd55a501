//! On-disk persistence for labeling sessions.
//!
//! Each session is one JSON document under `{data_dir}/sessions/`. Every web
//! interaction loads the document, applies one operation, and writes it back,
//! so no in-memory state has to survive between requests.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::{Label, LabelingOptions, Record};

use super::{LabelingSession, SessionError, SessionSnapshot};

/// Errors from the session store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt session file: {0}")]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// A session as persisted on disk: the record set, its snapshot, and
/// identifying metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    /// Random session id (also the filename stem).
    pub id: String,
    /// Display name, usually the uploaded filename.
    pub name: String,
    /// SHA-256 of the source bytes; identical uploads resume this session.
    pub source_hash: String,
    /// Name of the text column the records came from.
    pub text_column: String,
    /// Labeling configuration fixed at creation time.
    pub options: LabelingOptions,
    /// The ordered record set, never mutated after creation.
    pub records: Vec<Record>,
    /// Persisted walk state.
    pub cursor: usize,
    /// Persisted label slots, one per record.
    pub labels: Vec<Option<Label>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredSession {
    /// Rebuild the walk from the persisted state.
    pub fn open(&self) -> Result<LabelingSession, SessionError> {
        LabelingSession::resume(
            self.records.clone(),
            SessionSnapshot {
                cursor: self.cursor,
                labels: self.labels.clone(),
            },
            self.options,
        )
    }

    /// Write a mutated walk's state back into this document.
    pub fn absorb(&mut self, session: &LabelingSession) {
        let snapshot = session.snapshot();
        self.cursor = snapshot.cursor;
        self.labels = snapshot.labels;
        self.updated_at = Utc::now();
    }

    /// Number of records with a label assigned.
    pub fn labeled_count(&self) -> usize {
        self.labels.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.cursor == self.records.len()
    }
}

/// Compute the source fingerprint for uploaded bytes.
pub fn source_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// File-backed session store.
pub struct SessionStore {
    sessions_dir: PathBuf,
}

impl SessionStore {
    /// Open a store rooted at a data directory, creating it if needed.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        let sessions_dir = data_dir.join("sessions");
        fs::create_dir_all(&sessions_dir)?;
        Ok(Self { sessions_dir })
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.sessions_dir.join(format!("{}.json", id))
    }

    /// Create a session for an uploaded record set.
    ///
    /// If a session with the same source fingerprint already exists, its
    /// accumulated state is left untouched and it is returned instead.
    pub fn create(
        &self,
        name: &str,
        source_hash: &str,
        text_column: &str,
        records: Vec<Record>,
        options: LabelingOptions,
    ) -> Result<StoredSession, StoreError> {
        if let Some(existing) = self.find_by_source_hash(source_hash)? {
            tracing::info!(
                session = %existing.id,
                "upload matches existing session, resuming"
            );
            return Ok(existing);
        }

        // Validates the non-empty precondition
        let session = LabelingSession::new(records, options)?;
        let snapshot = session.snapshot();

        let now = Utc::now();
        let stored = StoredSession {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            source_hash: source_hash.to_string(),
            text_column: text_column.to_string(),
            options,
            records: session.records().to_vec(),
            cursor: snapshot.cursor,
            labels: snapshot.labels,
            created_at: now,
            updated_at: now,
        };
        self.save(&stored)?;
        tracing::info!(session = %stored.id, records = stored.records.len(), "created session");
        Ok(stored)
    }

    /// Load a session by id.
    pub fn load(&self, id: &str) -> Result<StoredSession, StoreError> {
        let path = self.path_for(id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Load a session by id or unambiguous id prefix.
    pub fn load_by_prefix(&self, prefix: &str) -> Result<StoredSession, StoreError> {
        if let Ok(stored) = self.load(prefix) {
            return Ok(stored);
        }
        let mut matches: Vec<StoredSession> = self
            .list()?
            .into_iter()
            .filter(|s| s.id.starts_with(prefix))
            .collect();
        if matches.len() == 1 {
            Ok(matches.remove(0))
        } else {
            Err(StoreError::NotFound(prefix.to_string()))
        }
    }

    /// Persist a session document. Writes through a temp file in the same
    /// directory so a crash mid-write cannot truncate existing state.
    pub fn save(&self, stored: &StoredSession) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(stored)?;
        let tmp = tempfile::NamedTempFile::new_in(&self.sessions_dir)?;
        fs::write(tmp.path(), &json)?;
        tmp.persist(self.path_for(&stored.id))
            .map_err(|e| e.error)?;
        Ok(())
    }

    /// All stored sessions, newest first.
    pub fn list(&self) -> Result<Vec<StoredSession>, StoreError> {
        let mut sessions = Vec::new();
        for entry in fs::read_dir(&self.sessions_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "json") {
                match fs::read(&path).map_err(StoreError::from).and_then(|bytes| {
                    serde_json::from_slice::<StoredSession>(&bytes).map_err(StoreError::from)
                }) {
                    Ok(stored) => sessions.push(stored),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "skipping unreadable session file");
                    }
                }
            }
        }
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }

    /// Find a session by its source fingerprint.
    pub fn find_by_source_hash(&self, hash: &str) -> Result<Option<StoredSession>, StoreError> {
        Ok(self.list()?.into_iter().find(|s| s.source_hash == hash))
    }

    /// Delete a session document.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn records(texts: &[&str]) -> Vec<Record> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Record::new(i, *t))
            .collect()
    }

    #[test]
    fn test_source_hash_is_hex_sha256() {
        let hash = source_hash(b"Content\na\n");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, source_hash(b"Content\na\n"));
        assert_ne!(hash, source_hash(b"Content\nb\n"));
    }

    #[test]
    fn test_create_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();

        let stored = store
            .create(
                "reviews.csv",
                &source_hash(b"x"),
                "Content",
                records(&["a", "b"]),
                LabelingOptions::default(),
            )
            .unwrap();

        let loaded = store.load(&stored.id).unwrap();
        assert_eq!(loaded.name, "reviews.csv");
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.cursor, 0);
        assert_eq!(loaded.labels, vec![None, None]);
    }

    #[test]
    fn test_create_rejects_empty_records() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        let result = store.create(
            "empty.csv",
            &source_hash(b""),
            "Content",
            Vec::new(),
            LabelingOptions::default(),
        );
        assert!(matches!(
            result,
            Err(StoreError::Session(SessionError::EmptyInput))
        ));
    }

    #[test]
    fn test_same_source_resumes_existing_session() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        let hash = source_hash(b"same bytes");

        let first = store
            .create(
                "a.csv",
                &hash,
                "Content",
                records(&["a", "b"]),
                LabelingOptions::default(),
            )
            .unwrap();

        // Make progress, write it back
        let mut session = first.open().unwrap();
        session.label(0, Label::Positive).unwrap();
        session.advance();
        let mut stored = first.clone();
        stored.absorb(&session);
        store.save(&stored).unwrap();

        // Re-uploading the same bytes must not reset the walk
        let again = store
            .create(
                "a.csv",
                &hash,
                "Content",
                records(&["a", "b"]),
                LabelingOptions::default(),
            )
            .unwrap();
        assert_eq!(again.id, first.id);
        assert_eq!(again.cursor, 1);
        assert_eq!(again.labels[0], Some(Label::Positive));
    }

    #[test]
    fn test_absorb_updates_walk_state() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        let mut stored = store
            .create(
                "a.csv",
                &source_hash(b"y"),
                "Content",
                records(&["a", "b", "c"]),
                LabelingOptions::default(),
            )
            .unwrap();

        let mut session = stored.open().unwrap();
        session.label(0, Label::Negative).unwrap();
        session.advance();
        stored.absorb(&session);
        store.save(&stored).unwrap();

        let loaded = store.load(&stored.id).unwrap();
        assert_eq!(loaded.cursor, 1);
        assert_eq!(loaded.labels[0], Some(Label::Negative));
        assert_eq!(loaded.labeled_count(), 1);
        assert!(!loaded.is_complete());
    }

    #[test]
    fn test_list_newest_first_and_prefix_lookup() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();

        let a = store
            .create(
                "a.csv",
                &source_hash(b"a"),
                "Content",
                records(&["a"]),
                LabelingOptions::default(),
            )
            .unwrap();
        let b = store
            .create(
                "b.csv",
                &source_hash(b"b"),
                "Content",
                records(&["b"]),
                LabelingOptions::default(),
            )
            .unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 2);

        let found = store.load_by_prefix(&a.id[..8]).unwrap();
        assert_eq!(found.id, a.id);
        let found = store.load_by_prefix(&b.id).unwrap();
        assert_eq!(found.id, b.id);
        assert!(matches!(
            store.load_by_prefix("no-such"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_missing_session() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.load("missing"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        let stored = store
            .create(
                "a.csv",
                &source_hash(b"z"),
                "Content",
                records(&["a"]),
                LabelingOptions::default(),
            )
            .unwrap();
        store.delete(&stored.id).unwrap();
        assert!(matches!(
            store.load(&stored.id),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete(&stored.id),
            Err(StoreError::NotFound(_))
        ));
    }
}
