//! Error types for the toolkit.
//!
//! The widget layer itself degrades gracefully: missing lookups return
//! `None`, structural misuse is a no-op, and the markup loader skips
//! malformed lines with a warning. Errors only surface at the file
//! boundary, when a markup or style file cannot be read at all.

use std::path::PathBuf;

/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, MarkupError>;

/// Errors produced by the markup and style-sheet loaders.
#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    /// File I/O error while reading a markup or style file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MarkupError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
