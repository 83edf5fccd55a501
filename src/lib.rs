//! rowlabel - interactive CSV text labeling tool.
//!
//! Load a CSV with a text column, walk it one row at a time in the browser,
//! assign each row a label from a fixed set, and download the results as CSV.

pub mod cli;
pub mod config;
pub mod export;
pub mod ingest;
pub mod models;
pub mod server;
pub mod session;
pub mod utils;
