//! Error types for the SyncPlay server
//!
//! Infrastructure failures only. Protocol-level rejections (queue at
//! capacity, out-of-range index) are not errors here; they surface as
//! `queue:error` messages or silent no-ops per the channel contract.

use thiserror::Error;

/// Main error type for syncplay-server
#[derive(Error, Debug)]
pub enum Error {
    /// Catalog file loading or parsing errors
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// HTTP server errors
    #[error("HTTP server error: {0}")]
    Http(String),

    /// Hub dispatcher errors (channel closed, task gone)
    #[error("Hub error: {0}")]
    Hub(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using syncplay-server Error
pub type Result<T> = std::result::Result<T, Error>;
