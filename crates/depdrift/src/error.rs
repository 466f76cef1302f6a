//! Error types for depdrift operations.
//!
//! The transformation core itself is pure and has no fatal conditions:
//! malformed paths, stale node ids, and unresolvable edge endpoints all
//! degrade to "nothing to render" for that item. Errors exist only at the
//! boundary where snapshot files are read and parsed.

use thiserror::Error;

/// Result type for depdrift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for depdrift operations.
#[derive(Debug, Error)]
pub enum Error {
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot file was not valid JSON for the analyzer's edge format.
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}
