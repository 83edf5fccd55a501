//! HTTP request handlers for the labeling server.

mod export_api;
mod pages;
mod sessions_api;
mod static_files;

// Re-export handlers for use by the router
pub use export_api::export_csv;
pub use pages::{annotate_page, create_session, home_page, retreat_session, submit_label};
pub use sessions_api::{api_session, api_sessions};
pub use static_files::serve_css;
