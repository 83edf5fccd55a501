//! Static asset constants (CSS).

/// Stylesheet for the web interface.
pub const CSS: &str = include_str!("styles.css");
