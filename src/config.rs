//! Configuration management for rowlabel.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ingest::DEFAULT_TEXT_COLUMN;
use crate::models::LabelingOptions;

/// Config filename inside the data directory.
pub const CONFIG_FILENAME: &str = "rowlabel.toml";

/// Runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base data directory (sessions live under it).
    pub data_dir: PathBuf,
    /// Name of the CSV column holding the text to label.
    pub text_column: String,
    /// Default labeling options for new sessions.
    pub options: LabelingOptions,
}

impl Default for Settings {
    fn default() -> Self {
        // Default to ~/.local/share/rowlabel (platform equivalent)
        // Falls back gracefully: data dir -> home dir -> current dir
        let data_dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rowlabel");

        Self {
            data_dir,
            text_column: DEFAULT_TEXT_COLUMN.to_string(),
            options: LabelingOptions::default(),
        }
    }
}

impl Settings {
    /// Directory holding session documents.
    pub fn sessions_dir(&self) -> PathBuf {
        self.data_dir.join("sessions")
    }

    /// Path of the config file inside the data directory.
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILENAME)
    }
}

/// Load settings, preferring the CLI data-dir override, then the config file
/// in the resolved data directory, then defaults.
///
/// Tilde paths in the override are expanded.
pub fn load_settings(data_dir_override: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(dir) = data_dir_override {
        let expanded = shellexpand::tilde(&dir.to_string_lossy()).to_string();
        settings.data_dir = PathBuf::from(expanded);
    }

    let config_path = settings.config_path();
    if config_path.exists() {
        let raw = std::fs::read_to_string(&config_path)?;
        let mut from_file: Settings = toml::from_str(&raw)?;
        // The directory we found the file in wins over whatever it says
        from_file.data_dir = settings.data_dir;
        settings = from_file;
        tracing::info!(path = %config_path.display(), "loaded config");
    }

    Ok(settings)
}
