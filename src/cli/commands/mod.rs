//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific
//! modules.

mod export;
mod serve;
mod sessions;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::load_settings;

pub use export::ExportRangeArg;

#[derive(Parser)]
#[command(name = "rowl")]
#[command(about = "Interactive CSV text labeling tool")]
#[command(version)]
pub struct Cli {
    /// Data directory (sessions and config live here)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the labeling web UI
    Serve {
        /// Address to bind to: PORT, HOST, or HOST:PORT (default: 127.0.0.1:3030)
        #[arg(default_value = "127.0.0.1:3030")]
        bind: String,
    },

    /// List stored labeling sessions
    Sessions,

    /// Export a stored session's labels to CSV
    Export {
        /// Session id (or unambiguous id prefix)
        session: String,

        /// Which rows to export
        #[arg(long, value_enum, default_value = "full")]
        range: ExportRangeArg,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Serve { bind } => serve::cmd_serve(&settings, &bind).await,
        Commands::Sessions => sessions::cmd_sessions(&settings),
        Commands::Export {
            session,
            range,
            output,
        } => export::cmd_export(&settings, &session, range, output.as_deref()),
    }
}
