//! Error types for the watermark remover

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the watermark remover.
///
/// A resource that does not carry the watermark signature is never an error;
/// every variant here is fatal to a run.
#[derive(Error, Debug)]
pub enum Error {
    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Input could not be decoded as a PDF document
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    /// Encrypted documents are not supported
    #[error("PDF is encrypted: {}", .0.display())]
    Encrypted(PathBuf),

    /// A page could not be added to the output document
    #[error("failed to add page {page} to output: {reason}")]
    Append { page: usize, reason: String },

    /// The output document could not be written
    #[error("failed to create output PDF {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
