//! Web server for the labeling walk.
//!
//! One page per interaction: every request re-hydrates the session from the
//! store, applies at most one operation, writes the state back, and
//! re-renders. Nothing about the walk lives only in memory.

mod assets;
mod handlers;
mod routes;
mod templates;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::session::SessionStore;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SessionStore>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let store = SessionStore::open(&settings.data_dir)?;
        Ok(Self {
            store: Arc::new(store),
            settings: Arc::new(settings.clone()),
        })
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
