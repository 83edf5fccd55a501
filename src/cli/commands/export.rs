//! Headless CSV export of a stored session.

use std::io::Write;
use std::path::Path;

use console::style;

use crate::config::Settings;
use crate::export;
use crate::session::SessionStore;

/// Which rows an export covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportRangeArg {
    /// Every row, unset labels as empty fields
    #[default]
    Full,
    /// Only the labeled-so-far prefix
    Partial,
}

/// Export a session's labels to a file or stdout.
pub fn cmd_export(
    settings: &Settings,
    session_ref: &str,
    range: ExportRangeArg,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let store = SessionStore::open(&settings.data_dir)?;
    let stored = store.load_by_prefix(session_ref)?;
    let session = stored.open()?;

    let view = match range {
        ExportRangeArg::Full => session.export_full(),
        ExportRangeArg::Partial => session.export_partial(),
    };
    let csv = export::to_csv(&view, &stored.text_column);

    match output {
        Some(path) => {
            std::fs::write(path, &csv)?;
            println!(
                "{} Wrote {} rows to {}",
                style("✓").green(),
                view.len(),
                path.display()
            );
        }
        None => {
            std::io::stdout().write_all(&csv)?;
        }
    }

    Ok(())
}
