//! Server configuration

use std::path::PathBuf;

/// SyncPlay server configuration, resolved from CLI arguments and
/// environment in `main`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP/WebSocket server binds to
    pub port: u16,
    /// Path to the catalog JSON file (array of tracks)
    pub catalog_path: PathBuf,
}
