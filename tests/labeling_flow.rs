//! End-to-end labeling flow through the public API: ingest a CSV, walk it
//! with persistence after every step, and export the results.

use tempfile::tempdir;

use rowlabel::export::to_csv;
use rowlabel::ingest::load_records;
use rowlabel::models::{Label, LabelSet, LabelingOptions};
use rowlabel::session::{source_hash, SessionStore};

const CSV: &[u8] = b"Id,Content\n1,\"great product, loved it\"\n2,awful experience\n3,arrived on time\n";

#[test]
fn labeling_walk_survives_reloads() {
    let dir = tempdir().unwrap();
    let store = SessionStore::open(dir.path()).unwrap();

    let records = load_records(CSV, "Content").unwrap();
    assert_eq!(records.len(), 3);

    let options = LabelingOptions {
        label_set: LabelSet::Ternary,
        allow_backward: true,
    };
    let stored = store
        .create("reviews.csv", &source_hash(CSV), "Content", records, options)
        .unwrap();
    let id = stored.id.clone();

    // Every step re-opens the session from disk, applies one operation, and
    // writes the state back - the same shape as one web interaction.
    let labels = [Label::Positive, Label::Negative, Label::Irrelevant];
    for label in labels {
        let mut stored = store.load(&id).unwrap();
        let mut session = stored.open().unwrap();
        let position = session.current().unwrap().position;
        session.label(position, label).unwrap();
        session.advance();
        stored.absorb(&session);
        store.save(&stored).unwrap();
    }

    let stored = store.load(&id).unwrap();
    assert!(stored.is_complete());
    assert_eq!(stored.labeled_count(), 3);

    // Step back once, re-label, and finish again
    let mut session = stored.open().unwrap();
    session.retreat();
    let position = session.current().unwrap().position;
    assert_eq!(position, 2);
    session.label(position, Label::Negative).unwrap();
    session.advance();
    let mut stored = stored;
    stored.absorb(&session);
    store.save(&stored).unwrap();

    let session = store.load(&id).unwrap().open().unwrap();
    let csv = String::from_utf8(to_csv(&session.export_full(), "Content")).unwrap();
    assert_eq!(
        csv,
        "Content,Label\n\"great product, loved it\",Positive\nawful experience,Negative\narrived on time,Negative\n"
    );
}

#[test]
fn partial_export_tracks_cursor() {
    let dir = tempdir().unwrap();
    let store = SessionStore::open(dir.path()).unwrap();

    let records = load_records(b"Content\na\nb\nc\n", "Content").unwrap();
    let mut stored = store
        .create(
            "small.csv",
            &source_hash(b"Content\na\nb\nc\n"),
            "Content",
            records,
            LabelingOptions::default(),
        )
        .unwrap();

    let mut session = stored.open().unwrap();
    session.label(0, Label::Positive).unwrap();
    session.advance();
    stored.absorb(&session);
    store.save(&stored).unwrap();

    let session = store.load(&stored.id).unwrap().open().unwrap();
    let csv = String::from_utf8(to_csv(&session.export_partial(), "Content")).unwrap();
    assert_eq!(csv, "Content,Label\na,Positive\n");
}
