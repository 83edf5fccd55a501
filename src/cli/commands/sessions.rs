//! Session listing command.

use console::style;

use crate::config::Settings;
use crate::session::SessionStore;

/// List stored sessions with their progress.
pub fn cmd_sessions(settings: &Settings) -> anyhow::Result<()> {
    let store = SessionStore::open(&settings.data_dir)?;
    let sessions = store.list()?;

    if sessions.is_empty() {
        println!("No sessions. Run `rowl serve` and upload a CSV to start one.");
        return Ok(());
    }

    for session in sessions {
        let status = if session.is_complete() {
            style("complete").green().to_string()
        } else {
            format!("at row {}/{}", session.cursor + 1, session.records.len())
        };
        println!(
            "{}  {}  {} rows, {} labeled  [{}]",
            style(&session.id[..8]).cyan(),
            session.name,
            session.records.len(),
            session.labeled_count(),
            status
        );
    }

    Ok(())
}
