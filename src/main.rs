//! rowlabel - interactive CSV text labeling tool.
//!
//! Serves a small local web UI for walking the rows of a CSV file and
//! assigning each one a label from a fixed set.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rowlabel::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if cli::is_verbose() {
        "rowlabel=info"
    } else {
        "rowlabel=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Run CLI
    cli::run().await
}
